pub type RequestId = u64;

pub type CallerHandle = u64;

pub trait RequestIdGenerator: Send + Sync {
    fn next(&self) -> RequestId;
}
