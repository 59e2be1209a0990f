//! Typed syntax tree
//!
//! The node shapes consumed by class lowering. Trees are produced by the
//! parser and binder upstream; every binding site already carries the
//! [`DeclId`] the binder resolved it to, and every annotation is already a
//! [`TypeId`] in the [`TypeContext`](crate::TypeContext).

use std::sync::Arc;

use crate::span::Span;
use crate::ty::TypeId;

/// Identifier of a resolved declaration (one entry in the symbol table)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeclId(pub u32);

impl DeclId {
    /// Create a new declaration ID
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for DeclId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "decl{}", self.0)
    }
}

/// A name with its location
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    /// The identifier text
    pub name: String,
    /// Where it appears
    pub span: Span,
}

impl Identifier {
    /// Create a new identifier
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// A whole compilation unit
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Top-level statements in source order
    pub statements: Vec<Statement>,
    /// Span of the whole unit
    pub span: Span,
}

/// Statements understood by the lowering core
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `class Name { ... }`
    Class(ClassDecl),
    /// `return <literal>?;`
    Return(ReturnStatement),
    /// `;`
    Empty(Span),
}

impl Statement {
    /// Source span of the statement
    pub fn span(&self) -> Span {
        match self {
            Statement::Class(decl) => decl.span,
            Statement::Return(ret) => ret.span,
            Statement::Empty(span) => *span,
        }
    }
}

/// `return` statement
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    /// Returned value, `None` for a bare `return;`
    pub argument: Option<Literal>,
    /// Statement span
    pub span: Span,
}

/// Literal expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// `undefined`
    Undefined,
    /// `null`
    Null,
    /// `true` / `false`
    Boolean(bool),
    /// Numeric literal
    Number(f64),
    /// String literal (already unescaped)
    String(String),
    /// BigInt literal, decimal digits without the `n` suffix
    BigInt(String),
}

/// `{ statements }`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockStatement {
    /// Statements in source order
    pub statements: Vec<Statement>,
    /// Block span
    pub span: Span,
}

/// Function parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// Parameter name
    pub name: Identifier,
    /// Resolved annotation, if any
    pub ty: Option<TypeId>,
}

/// `function name?(params): ret { body }`, also used for method values
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionExpression {
    /// Optional own name
    pub id: Option<Identifier>,
    /// Parameters in order
    pub params: Vec<Param>,
    /// Resolved return annotation, if any
    pub return_type: Option<TypeId>,
    /// Function body
    pub body: BlockStatement,
    /// Span of the whole function
    pub span: Span,
}

impl FunctionExpression {
    /// Create a function with the given parameters and body statements
    pub fn new(params: Vec<Param>, statements: Vec<Statement>, span: Span) -> Self {
        Self {
            id: None,
            params,
            return_type: None,
            body: BlockStatement { statements, span },
            span,
        }
    }

    /// Set the return annotation
    pub fn with_return_type(mut self, ty: TypeId) -> Self {
        self.return_type = Some(ty);
        self
    }
}

/// `class Name extends Super? { body }`
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    /// Class name
    pub id: Identifier,
    /// Declaration the binder created for the class name
    pub decl: DeclId,
    /// Superclass expression, rejected by the type checker for typed classes
    pub super_class: Option<Identifier>,
    /// Class body
    pub body: ClassBody,
    /// Span of the whole declaration
    pub span: Span,
}

/// Members of a class
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClassBody {
    /// Members in source order
    pub members: Vec<ClassMember>,
}

impl ClassBody {
    /// Find the explicit constructor, if the class declares one
    pub fn constructor(&self) -> Option<&MethodDefinition> {
        self.members.iter().find_map(|member| match member {
            ClassMember::Method(method) if method.kind == MethodKind::Constructor => Some(method),
            _ => None,
        })
    }

    /// Iterate over method members
    pub fn methods(&self) -> impl Iterator<Item = &MethodDefinition> {
        self.members.iter().filter_map(|member| match member {
            ClassMember::Method(method) => Some(method),
            ClassMember::Property(_) => None,
        })
    }
}

/// A class member
#[derive(Debug, Clone, PartialEq)]
pub enum ClassMember {
    /// Method, accessor or constructor
    Method(MethodDefinition),
    /// Field declaration
    Property(PropertyDefinition),
}

/// Kind of a method definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodKind {
    /// The reserved `constructor` member
    Constructor,
    /// Ordinary method
    Method,
    /// `get` accessor
    Get,
    /// `set` accessor
    Set,
}

/// A method member
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDefinition {
    /// Member name
    pub key: Identifier,
    /// Member kind
    pub kind: MethodKind,
    /// Method body, shared with the class type's field table
    pub value: Arc<FunctionExpression>,
    /// Whether the member is `static`
    pub is_static: bool,
    /// Member span
    pub span: Span,
}

/// A field member
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDefinition {
    /// Field name
    pub key: Identifier,
    /// Resolved annotation, if any
    pub ty: Option<TypeId>,
    /// Member span
    pub span: Span,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(name: &str, kind: MethodKind) -> ClassMember {
        ClassMember::Method(MethodDefinition {
            key: Identifier::new(name, Span::default()),
            kind,
            value: Arc::new(FunctionExpression::new(vec![], vec![], Span::default())),
            is_static: false,
            span: Span::default(),
        })
    }

    #[test]
    fn test_constructor_lookup_by_kind() {
        let body = ClassBody {
            members: vec![
                method("greet", MethodKind::Method),
                ClassMember::Property(PropertyDefinition {
                    key: Identifier::new("x", Span::default()),
                    ty: Some(TypeId::NUMBER),
                    span: Span::default(),
                }),
                method("constructor", MethodKind::Constructor),
            ],
        };

        let ctor = body.constructor().expect("constructor member");
        assert_eq!(ctor.key.name, "constructor");
        assert_eq!(body.methods().count(), 2);
    }

    #[test]
    fn test_no_constructor() {
        let body = ClassBody {
            members: vec![method("greet", MethodKind::Method)],
        };
        assert!(body.constructor().is_none());
    }

    #[test]
    fn test_statement_span() {
        let span = Span::new(1, 2, 1, 2);
        assert_eq!(Statement::Empty(span).span(), span);
    }
}
