//! Policy trait and chain evaluation
//!
//! A handler assembles an ordered chain of policies for the route it
//! serves and evaluates it once per request. The chain short-circuits
//! on the first denial; order matters because later policies may
//! depend on objects earlier policies resolved.

use async_trait::async_trait;

use crate::decision::AuthorizationDecision;
use crate::objects::AuthorizedObjects;
use crate::request::RequestContext;

/// A single authorization rule evaluated against a request.
///
/// Policies are stateless per invocation: they read the request
/// context and the objects resolved so far, produce exactly one
/// decision, and may register resolved objects for downstream
/// consumers. They perform no persistence.
#[async_trait]
pub trait Policy: Send + Sync {
    /// Policy name for logging and instrumentation.
    fn name(&self) -> &'static str;

    /// Evaluate this policy for one request.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The request under evaluation
    /// * `objects` - Objects resolved by earlier policies; this
    ///   policy may add its own
    async fn evaluate(
        &self,
        ctx: &RequestContext,
        objects: &mut AuthorizedObjects,
    ) -> AuthorizationDecision;
}

/// The result of evaluating a full chain.
#[derive(Debug, Clone)]
pub struct ChainOutcome {
    /// The chain's decision (the first denial, or a permit)
    pub decision: AuthorizationDecision,

    /// Objects resolved by the policies that ran
    pub objects: AuthorizedObjects,
}

impl ChainOutcome {
    /// Check the authoritative tag of the chain decision.
    pub fn is_permitted(&self) -> bool {
        self.decision.is_permitted()
    }
}

/// An ordered sequence of policies with short-circuit AND semantics.
///
/// # Examples
///
/// ```rust,no_run
/// use journal_authz::{PolicyChain, RequestContext};
/// use journal_authz::policies::ContextRequiredPolicy;
///
/// # async fn example() {
/// let chain = PolicyChain::new().with_policy(ContextRequiredPolicy);
/// let ctx = RequestContext::new("list_issues");
/// let outcome = chain.evaluate(&ctx).await;
/// assert!(!outcome.is_permitted()); // no journal resolved
/// # }
/// ```
#[derive(Default)]
pub struct PolicyChain {
    policies: Vec<Box<dyn Policy>>,
}

impl PolicyChain {
    /// Create an empty chain.
    ///
    /// An empty chain permits; handlers are expected to add at least
    /// one policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a policy to the end of the chain.
    pub fn with_policy(mut self, policy: impl Policy + 'static) -> Self {
        self.policies.push(Box::new(policy));
        self
    }

    /// Append a boxed policy to the end of the chain.
    pub fn push(&mut self, policy: Box<dyn Policy>) {
        self.policies.push(policy);
    }

    /// Number of policies in the chain.
    pub fn len(&self) -> usize {
        self.policies.len()
    }

    /// Check if the chain has no policies.
    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    /// Evaluate the chain for one request.
    ///
    /// Policies run strictly in order. The first denial is returned
    /// as-is and later policies are never invoked. When every policy
    /// permits, the outcome carries the union of all registered
    /// objects.
    pub async fn evaluate(&self, ctx: &RequestContext) -> ChainOutcome {
        let mut objects = AuthorizedObjects::new();

        for policy in &self.policies {
            let decision = policy.evaluate(ctx, &mut objects).await;
            if !decision.is_permitted() {
                return ChainOutcome { decision, objects };
            }
        }

        ChainOutcome {
            decision: AuthorizationDecision::permit(),
            objects,
        }
    }
}
