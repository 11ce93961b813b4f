//! Common imports for hosts embedding the processor.

pub use crate::a2ui::{
    A2uiError, A2uiMessageProcessor, A2uiResult, BatchOutcome, ComponentKind, ComponentRegistry,
    ComponentTree, ProcessorConfig, ProcessorEvent, PropertyValue, ProtocolMessage, ResolvedComponent,
    ResolvedNode, RuntimeContext, Subscription, TreeDiagnostic, UnknownNodePolicy, UserAction,
};
