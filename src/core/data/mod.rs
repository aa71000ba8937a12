//! Core data types shared by the front-end, the builders and the locale engines.
//!
//! ## Module Structure
//!
//! - `decl`: typed declaration IR lowered from TypeScript sources
//! - `locale`: locale store types (`locales/<code>.json`)
//! - `manifest`: app manifest types (`app.json`)

pub mod decl;
pub mod locale;
pub mod manifest;

pub use decl::{
    ClassDecl, ClassMethod, Declaration, Field, InterfaceDecl, MethodSignature, ObjectProperty,
    Param, ParamType, PrimitiveKind, SourceDecls, VariableDecl, Visibility,
};
pub use locale::{
    CapabilityLocale, DriverLocale, ENTRY_TITLE_KEY, EntryLocale, FieldLocale, FlowLocales,
    LocaleStore,
};
pub use manifest::{
    Action, App, Argument, ArgumentType, BASE_LANGUAGE, CapabilityOption, Driver, DropdownValue,
    Example, Flows, Images, LString, Token, TokenType, Trigger,
};
