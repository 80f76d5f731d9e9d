use super::order::{OrderStateId, OrderStateTarget, OrderView};
use crate::config::OrderStateMap;

/// Maps provider status groups onto configured local order states.
#[derive(Debug, Clone, Default)]
pub struct PaymentStatusMapper {
    states: OrderStateMap,
}

impl PaymentStatusMapper {
    pub fn new(states: OrderStateMap) -> Self {
        Self { states }
    }

    /// Canonical target for a provider group. Unknown groups map to nothing.
    pub fn map(group: &str) -> Option<OrderStateTarget> {
        match group {
            "started" => Some(OrderStateTarget::Started),
            "pending" => Some(OrderStateTarget::Pending),
            "completed" => Some(OrderStateTarget::Completed),
            "failed" => Some(OrderStateTarget::Failed),
            _ => None,
        }
    }

    /// Local state id for a provider group, if both the group is known and
    /// its target is configured.
    pub fn resolve(&self, group: &str) -> Option<OrderStateId> {
        Self::map(group).and_then(|target| self.states.get(target))
    }
}

/// What to do with an order after a provider status report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Status could not be mapped; leave the order alone and send the
    /// shopper to a neutral page.
    Abstain,
    /// The order is already in the mapped state.
    NoChange { state: OrderStateId },
    /// Move the order from `from` to `to`.
    Transition {
        from: Option<OrderStateId>,
        to: OrderStateId,
    },
}

/// Decides order transitions from provider status groups.
///
/// Replaying the same status for the same order always yields
/// [`Decision::NoChange`], so duplicate webhook and redirect deliveries do not
/// fire the host's transition side effects twice.
#[derive(Debug, Clone, Default)]
pub struct OrderStateReconciler {
    mapper: PaymentStatusMapper,
}

impl OrderStateReconciler {
    pub fn new(mapper: PaymentStatusMapper) -> Self {
        Self { mapper }
    }

    pub fn reconcile<O: OrderView + ?Sized>(&self, order: &O, group: &str) -> Decision {
        let Some(target) = self.mapper.resolve(group) else {
            return Decision::Abstain;
        };

        let current = order.current_state_id();
        if current == Some(target) {
            Decision::NoChange { state: target }
        } else {
            Decision::Transition {
                from: current,
                to: target,
            }
        }
    }
}
