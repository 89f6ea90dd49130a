use thiserror::Error;

pub type OwnerId = u64;

pub type OnOwnerDead = Box<dyn FnOnce() + Send + 'static>;

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum LivenessError {
    #[error("owner {0} is already dead")]
    AlreadyDead(OwnerId),
    #[error("could not watch owner {owner_id}: {reason}")]
    Unavailable { owner_id: OwnerId, reason: String },
}

// on_dead runs at most once and never from inside subscribe; an owner already gone is an error.
pub trait OwnerLiveness: Send + Sync {
    fn subscribe(&self, owner_id: OwnerId, on_dead: OnOwnerDead) -> Result<(), LivenessError>;

    fn unsubscribe(&self, owner_id: OwnerId);
}
