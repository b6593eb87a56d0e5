//! Pipeline composition: wraps the router in the middleware stack.

use tower::ServiceBuilder;

use super::metrics::{MetricsLayer, MetricsService};
use crate::service::router::OperationRouter;

/// The assembled middleware stack around an [`OperationRouter`].
pub type OperationPipeline = MetricsService<OperationRouter>;

/// Build the operation pipeline by wrapping the `OperationRouter` with middleware layers.
///
/// There is no load shedding or timeout layer: the external runtime
/// serializes calls, and a ledger call is never abandoned halfway.
#[must_use]
pub fn build_operation_pipeline(router: OperationRouter) -> OperationPipeline {
    ServiceBuilder::new().layer(MetricsLayer).service(router)
}
