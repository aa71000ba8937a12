//! Declaration IR produced by the TypeScript front-end.
//!
//! Builders only see these types, never swc nodes. A source file lowers to an ordered
//! list of top-level declarations: interfaces (action/trigger handlers), classes
//! (trigger emitters and drivers) and variables initialised with object literals
//! (driver capabilities).

use crate::core::parsers::jsdoc::JsDoc;

/// Primitive kind of a declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    String,
    Number,
    Unknown,
}

/// A named member of an inline object type (`{ zone: string }`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub kind: PrimitiveKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    Primitive(PrimitiveKind),
    /// Inline object type literal.
    Struct(Vec<Field>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: ParamType,
}

impl Param {
    pub fn kind(&self) -> PrimitiveKind {
        match self.ty {
            ParamType::Primitive(kind) => kind,
            ParamType::Struct(_) => PrimitiveKind::Unknown,
        }
    }
}

/// A method signature inside an interface body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    pub name: String,
    pub line: usize,
    pub params: Vec<Param>,
    pub doc: Option<JsDoc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceDecl {
    pub name: String,
    pub line: usize,
    pub methods: Vec<MethodSignature>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

/// A method with a body inside a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassMethod {
    pub name: String,
    pub line: usize,
    pub visibility: Visibility,
    pub params: Vec<Param>,
    /// Raw text of every comment preceding the method, delimiters included.
    pub leading_comment: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDecl {
    pub name: Option<String>,
    pub line: usize,
    pub doc: Option<JsDoc>,
    pub methods: Vec<ClassMethod>,
}

/// A property of an object literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectProperty {
    pub key: String,
    /// Value when it is a string literal.
    pub value: Option<String>,
    pub doc: Option<JsDoc>,
}

/// A variable initialised with an object literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDecl {
    pub name: String,
    pub line: usize,
    pub properties: Vec<ObjectProperty>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Interface(InterfaceDecl),
    Class(ClassDecl),
    Variable(VariableDecl),
}

/// Top-level declarations of one source file, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceDecls {
    pub file_path: String,
    pub declarations: Vec<Declaration>,
}

impl SourceDecls {
    pub fn interfaces(&self) -> impl Iterator<Item = &InterfaceDecl> {
        self.declarations.iter().filter_map(|d| match d {
            Declaration::Interface(decl) => Some(decl),
            _ => None,
        })
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassDecl> {
        self.declarations.iter().filter_map(|d| match d {
            Declaration::Class(decl) => Some(decl),
            _ => None,
        })
    }

    pub fn variables(&self) -> impl Iterator<Item = &VariableDecl> {
        self.declarations.iter().filter_map(|d| match d {
            Declaration::Variable(decl) => Some(decl),
            _ => None,
        })
    }
}
