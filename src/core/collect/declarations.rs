//! Lowers a parsed TypeScript module into the declaration IR.
//!
//! The collector walks module-level items only. It does not descend into function
//! bodies, arrow functions or class bodies beyond their member signatures.
//!
//! Documentation comments are looked up in swc's leading-comment map. swc attaches a
//! comment to the first token of the following node, so for `export class X` the
//! comment sits at the `export` keyword, and for decorated members it sits at the
//! first decorator. Each lookup therefore tries a short list of anchor positions.

use swc_common::{
    BytePos, SourceMap, Spanned,
    comments::{Comment, CommentKind},
};
use swc_ecma_ast::{
    Accessibility, ArrowExpr, Class, ClassMember, Decl, DefaultDecl, ExportDecl,
    ExportDefaultDecl, Expr, Function, Lit, Pat, Prop, PropName, PropOrSpread, TsFnParam,
    TsInterfaceDecl, TsKeywordTypeKind, TsType, TsTypeAnn, TsTypeElement, VarDecl,
};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::data::{
    ClassDecl, ClassMethod, Declaration, Field, InterfaceDecl, MethodSignature, ObjectProperty,
    Param, ParamType, PrimitiveKind, VariableDecl, Visibility,
};
use crate::core::parsers::jsdoc::JsDoc;
use crate::core::parsers::typescript::ExtractedComments;

pub struct DeclarationCollector<'a> {
    source_map: &'a SourceMap,
    comments: &'a ExtractedComments,
    /// Position of the enclosing `export` keyword, where swc keeps the leading comments.
    export_anchor: Option<BytePos>,
    /// 0 = module level, >0 = inside a function or arrow.
    scope_depth: usize,
    pub declarations: Vec<Declaration>,
}

impl<'a> DeclarationCollector<'a> {
    pub fn new(source_map: &'a SourceMap, comments: &'a ExtractedComments) -> Self {
        Self {
            source_map,
            comments,
            export_anchor: None,
            scope_depth: 0,
            declarations: Vec::new(),
        }
    }

    fn line(&self, pos: BytePos) -> usize {
        self.source_map.lookup_char_pos(pos).line
    }

    /// Leading comments at the first anchor that has any.
    fn leading(&self, anchors: &[BytePos]) -> &'a [Comment] {
        anchors
            .iter()
            .map(|pos| self.comments.leading_at(*pos))
            .find(|comments| !comments.is_empty())
            .unwrap_or(&[])
    }

    fn doc(&self, anchors: &[BytePos]) -> Option<JsDoc> {
        JsDoc::from_comments(self.leading(anchors))
    }

    fn anchors_with_export(&self, own: &[BytePos]) -> Vec<BytePos> {
        self.export_anchor.iter().chain(own).copied().collect()
    }

    fn collect_interface(&mut self, node: &TsInterfaceDecl) {
        let methods = node
            .body
            .body
            .iter()
            .filter_map(|member| match member {
                TsTypeElement::TsMethodSignature(sig) => {
                    let name = expr_name(&sig.key)?;
                    Some(MethodSignature {
                        name,
                        line: self.line(sig.span.lo),
                        params: sig.params.iter().filter_map(lower_fn_param).collect(),
                        doc: self.doc(&[sig.span.lo, sig.key.span().lo]),
                    })
                }
                _ => None,
            })
            .collect();

        self.declarations.push(Declaration::Interface(InterfaceDecl {
            name: node.id.sym.to_string(),
            line: self.line(node.span.lo),
            methods,
        }));
    }

    fn collect_class(&mut self, name: Option<String>, class: &Class) {
        let mut own = vec![class.span.lo];
        own.extend(class.decorators.iter().map(|d| d.span.lo));
        let anchors = self.anchors_with_export(&own);

        let methods = class
            .body
            .iter()
            .filter_map(|member| match member {
                ClassMember::Method(method) => {
                    let name = prop_name(&method.key)?;
                    let mut anchors = vec![method.span.lo, method.key.span().lo];
                    anchors.extend(method.function.decorators.iter().map(|d| d.span.lo));
                    Some(ClassMethod {
                        name,
                        line: self.line(method.span.lo),
                        visibility: match method.accessibility {
                            Some(Accessibility::Private) => Visibility::Private,
                            Some(Accessibility::Protected) => Visibility::Protected,
                            Some(Accessibility::Public) | None => Visibility::Public,
                        },
                        params: lower_function_params(&method.function),
                        leading_comment: raw_comment_text(self.leading(&anchors)),
                    })
                }
                _ => None,
            })
            .collect();

        self.declarations.push(Declaration::Class(ClassDecl {
            name,
            line: self.line(class.span.lo),
            doc: self.doc(&anchors),
            methods,
        }));
    }

    fn collect_variables(&mut self, node: &VarDecl) {
        for decl in &node.decls {
            let Pat::Ident(binding) = &decl.name else {
                continue;
            };
            let Some(init) = &decl.init else {
                continue;
            };
            let Expr::Object(obj) = unwrap_ts_expr(init) else {
                continue;
            };

            let properties = obj
                .props
                .iter()
                .filter_map(|prop| match prop {
                    PropOrSpread::Prop(prop) => match &**prop {
                        Prop::KeyValue(kv) => Some(ObjectProperty {
                            key: prop_name(&kv.key)?,
                            value: string_value(&kv.value),
                            doc: self.doc(&[kv.key.span().lo, prop.span().lo]),
                        }),
                        _ => None,
                    },
                    PropOrSpread::Spread(_) => None,
                })
                .collect();

            self.declarations.push(Declaration::Variable(VariableDecl {
                name: binding.id.sym.to_string(),
                line: self.line(decl.span.lo),
                properties,
            }));
        }
    }
}

impl Visit for DeclarationCollector<'_> {
    fn visit_export_decl(&mut self, node: &ExportDecl) {
        self.export_anchor = Some(node.span.lo);
        node.visit_children_with(self);
        self.export_anchor = None;
    }

    fn visit_export_default_decl(&mut self, node: &ExportDefaultDecl) {
        self.export_anchor = Some(node.span.lo);
        match &node.decl {
            DefaultDecl::Class(class_expr) => {
                let name = class_expr.ident.as_ref().map(|id| id.sym.to_string());
                self.collect_class(name, &class_expr.class);
            }
            DefaultDecl::TsInterfaceDecl(decl) => self.collect_interface(decl),
            DefaultDecl::Fn(_) => {}
        }
        self.export_anchor = None;
    }

    fn visit_decl(&mut self, node: &Decl) {
        if self.scope_depth > 0 {
            return;
        }
        match node {
            Decl::Class(class_decl) => {
                self.collect_class(Some(class_decl.ident.sym.to_string()), &class_decl.class);
            }
            Decl::TsInterface(decl) => self.collect_interface(decl),
            Decl::Var(var_decl) => self.collect_variables(var_decl),
            _ => node.visit_children_with(self),
        }
    }

    fn visit_function(&mut self, node: &Function) {
        self.scope_depth += 1;
        node.visit_children_with(self);
        self.scope_depth -= 1;
    }

    fn visit_arrow_expr(&mut self, node: &ArrowExpr) {
        self.scope_depth += 1;
        node.visit_children_with(self);
        self.scope_depth -= 1;
    }
}

// ============================================================
// Helper functions
// ============================================================

/// Rebuild the source text of comments, delimiters included, one per line.
fn raw_comment_text(comments: &[Comment]) -> String {
    comments
        .iter()
        .map(|c| match c.kind {
            CommentKind::Block => format!("/*{}*/", c.text),
            CommentKind::Line => format!("//{}", c.text),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn unwrap_ts_expr(expr: &Expr) -> &Expr {
    match expr {
        Expr::TsAs(ts_as) => unwrap_ts_expr(&ts_as.expr),
        Expr::TsConstAssertion(ts_const) => unwrap_ts_expr(&ts_const.expr),
        Expr::TsSatisfies(ts_sat) => unwrap_ts_expr(&ts_sat.expr),
        Expr::Paren(paren) => unwrap_ts_expr(&paren.expr),
        _ => expr,
    }
}

fn string_value(expr: &Expr) -> Option<String> {
    match unwrap_ts_expr(expr) {
        Expr::Lit(Lit::Str(s)) => s.value.as_str().map(|s| s.to_string()),
        Expr::Tpl(tpl) if tpl.exprs.is_empty() => tpl
            .quasis
            .first()
            .and_then(|q| q.cooked.as_ref())
            .and_then(|s| s.as_str().map(|s| s.to_string())),
        _ => None,
    }
}

fn prop_name(key: &PropName) -> Option<String> {
    match key {
        PropName::Ident(ident) => Some(ident.sym.to_string()),
        PropName::Str(s) => s.value.as_str().map(|s| s.to_string()),
        _ => None,
    }
}

fn expr_name(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Ident(ident) => Some(ident.sym.to_string()),
        Expr::Lit(Lit::Str(s)) => s.value.as_str().map(|s| s.to_string()),
        _ => None,
    }
}

fn primitive_kind(type_ann: Option<&TsTypeAnn>) -> PrimitiveKind {
    match type_ann.map(|ann| &*ann.type_ann) {
        Some(TsType::TsKeywordType(keyword)) => match keyword.kind {
            TsKeywordTypeKind::TsStringKeyword => PrimitiveKind::String,
            TsKeywordTypeKind::TsNumberKeyword => PrimitiveKind::Number,
            _ => PrimitiveKind::Unknown,
        },
        _ => PrimitiveKind::Unknown,
    }
}

fn lower_type(type_ann: Option<&TsTypeAnn>) -> ParamType {
    match type_ann.map(|ann| &*ann.type_ann) {
        Some(TsType::TsTypeLit(lit)) => ParamType::Struct(
            lit.members
                .iter()
                .filter_map(|member| match member {
                    TsTypeElement::TsPropertySignature(prop) => Some(Field {
                        name: expr_name(&prop.key)?,
                        kind: primitive_kind(prop.type_ann.as_deref()),
                    }),
                    _ => None,
                })
                .collect(),
        ),
        _ => ParamType::Primitive(primitive_kind(type_ann)),
    }
}

fn lower_fn_param(param: &TsFnParam) -> Option<Param> {
    match param {
        TsFnParam::Ident(binding) => Some(Param {
            name: binding.id.sym.to_string(),
            ty: lower_type(binding.type_ann.as_deref()),
        }),
        _ => None,
    }
}

fn lower_function_params(function: &Function) -> Vec<Param> {
    function
        .params
        .iter()
        .filter_map(|param| match &param.pat {
            Pat::Ident(binding) => Some(Param {
                name: binding.id.sym.to_string(),
                ty: lower_type(binding.type_ann.as_deref()),
            }),
            _ => None,
        })
        .collect()
}
