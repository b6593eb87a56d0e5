//! Operation dispatch.
//!
//! 1. **Classification** (`classify`): `(entry, name, args)` -> `Result<Operation, ClassifyError>`,
//!    including the per-operation arity check
//! 2. **Middleware** (`middleware`): Tower layers (metrics)
//! 3. **Routing** (`router`): Dispatch to domain services by `service_name`
//! 4. **Domain services** (`domain`): Agreement mutations and queries

pub mod classify;
pub mod domain;
pub mod middleware;
pub mod operation;
pub mod router;

pub use classify::OperationService;
pub use domain::{AgreementService, QueryService};
pub use operation::{
    service_names, ClassifyError, EntryMode, Operation, OperationContext, OperationError,
    OperationKind, OperationResponse,
};
pub use router::OperationRouter;
