//! # dotwalk Prelude
//!
//! The types and traits needed to build metadata, wrap it into nodes and walk it.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all dotwalk operations
pub use crate::Error;

/// The result type used throughout dotwalk
pub use crate::Result;

// ================================================================================================
// Metadata Handles
// ================================================================================================

pub use crate::metadata::{
    assembly::{Assembly, AssemblyBuilder, AssemblyRc},
    members::{Event, EventRc, Field, FieldRc, Param, ParamRc, Property, PropertyRc},
    method::{LocalVariable, LocalVariableRc, Method, MethodRc, MethodRef},
    token::{ScopeId, Token},
    typesystem::{CilType, CilTypeRc, CilTypeRef, MethodBuilder, RowAllocator, TypeBuilder},
};

// ================================================================================================
// Nodes
// ================================================================================================

pub use crate::element::{
    Accept, AssemblyNode, Composite, ConstructorNode, EventNode, FieldNode, LocalVariableNode,
    MethodNode, Node, NodeKind, ParameterNode, PropertyNode, TypeNode,
};

// ================================================================================================
// Visitors
// ================================================================================================

pub use crate::visitor::{MemberCounter, MemberCounts, NodeCollector, Visitor};

// ================================================================================================
// Refraction
// ================================================================================================

pub use crate::refraction::{
    classify, try_classify, CompositeRefraction, Fallback, Refraction, RefractionConfig,
    Refractor,
};
