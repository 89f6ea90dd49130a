use std::future::Future;
use std::pin::Pin;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll, Waker};
use std::time::{Duration, Instant};

pub struct CompletionSlot<T> {
    state: Mutex<SlotState<T>>,
    completed: Condvar,
}

struct SlotState<T> {
    value: Option<T>,
    is_completed: bool,
    waker: Option<Waker>,
}

impl<T> CompletionSlot<T> {
    pub fn new() -> Self {
        return CompletionSlot {
            state: Mutex::new(SlotState { value: None, is_completed: false, waker: None }),
            completed: Condvar::new(),
        };
    }

    pub fn complete(&self, value: T) -> bool {
        let mut guard = self.lock();
        if guard.is_completed {
            return false;
        }
        guard.value = Some(value);
        guard.is_completed = true;

        if let Some(waker) = guard.waker.take() {
            waker.wake();
        }
        self.completed.notify_all();
        return true;
    }

    pub fn is_completed(&self) -> bool {
        return self.lock().is_completed;
    }

    pub fn try_take(&self) -> Option<T> {
        return self.lock().value.take();
    }

    pub fn wait_timeout(&self, timeout: Duration) -> Option<T> {
        let deadline = Instant::now().checked_add(timeout);
        let mut guard = self.lock();
        loop {
            if guard.value.is_some() {
                return guard.value.take();
            }
            guard = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return None;
                    }
                    match self.completed.wait_timeout(guard, deadline - now) {
                        Ok((guard, _)) => guard,
                        Err(poisoned) => poisoned.into_inner().0,
                    }
                }
                None => self.completed.wait(guard).unwrap_or_else(PoisonError::into_inner),
            };
        }
    }

    fn lock(&self) -> MutexGuard<'_, SlotState<T>> {
        return self.state.lock().unwrap_or_else(PoisonError::into_inner);
    }
}

impl<T> Default for CompletionSlot<T> {
    fn default() -> Self {
        return Self::new();
    }
}

impl<T> Future for &CompletionSlot<T> {
    type Output = T;

    fn poll(self: Pin<&mut Self>, ctx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut guard = self.lock();
        if let Some(value) = guard.value.take() {
            return Poll::Ready(value);
        }
        match guard.waker.as_ref() {
            Some(waker) if waker.will_wake(ctx.waker()) => {}
            _ => guard.waker = Some(ctx.waker().clone()),
        }
        return Poll::Pending;
    }
}
