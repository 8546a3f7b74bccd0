//! Authorization gate for arbitrary operations.
//!
//! A gate pairs a [`Check`] ("is the current caller allowed to proceed?") with a
//! [`FailureHandler`] run on denial. Wrapping an operation with the gate yields a new
//! operation that re-evaluates the check on every call:
//!
//! ```
//! use oauth_consumer::gate::AuthorizationGate;
//!
//! let gate = AuthorizationGate::new(|| true, || eprintln!("denied"));
//! let add = gate.wrap(|(a, b): (i32, i32)| a + b);
//! assert_eq!(add((2, 3)).unwrap(), 5);
//! ```

use std::sync::Arc;

use log::{debug, warn};

use crate::error::{not_authorized_error, Error};

/// A single authorization rule.
///
/// Any `Fn() -> bool` closure is a `Check`. Implement it on a type when the rule needs
/// its own state, e.g. a handle to session storage.
pub trait Check: Send + Sync {
    fn eval(&self) -> bool;
}

impl<F> Check for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn eval(&self) -> bool {
        self()
    }
}

/// Hook run when a gate denies a call.
pub trait FailureHandler: Send + Sync {
    fn on_fail(&self);
}

impl<F> FailureHandler for F
where
    F: Fn() + Send + Sync,
{
    fn on_fail(&self) {
        self()
    }
}

/// Passes only when every inner rule passes, evaluated in order.
///
/// Evaluation stops at the first rule that returns `false`.
pub struct AllOf(Vec<Box<dyn Check>>);

impl AllOf {
    pub fn new(checks: Vec<Box<dyn Check>>) -> Self {
        Self(checks)
    }
}

impl Check for AllOf {
    fn eval(&self) -> bool {
        self.0.iter().all(|check| check.eval())
    }
}

/// Permits or denies operations based on a [`Check`].
///
/// Cloning is cheap; clones share the same rule and failure hook.
#[derive(Clone)]
pub struct AuthorizationGate {
    check: Arc<dyn Check>,
    on_fail: Arc<dyn FailureHandler>,
}

impl AuthorizationGate {
    pub fn new<C, H>(check: C, on_fail: H) -> Self
    where
        C: Check + 'static,
        H: FailureHandler + 'static,
    {
        Self {
            check: Arc::new(check),
            on_fail: Arc::new(on_fail),
        }
    }

    /// Evaluate the rule once and run `operation` only if it passes.
    ///
    /// On denial the failure hook runs and `operation` is dropped without being called.
    pub fn call<T, Op>(&self, operation: Op) -> Result<T, Error>
    where
        Op: FnOnce() -> T,
    {
        if self.check.eval() {
            debug!("Authorization check passed");
            Ok(operation())
        } else {
            warn!("Authorization check failed, operation not invoked");
            self.on_fail.on_fail();
            Err(not_authorized_error())
        }
    }

    /// Wrap `operation` so that every call goes through [`AuthorizationGate::call`].
    ///
    /// Operations taking several arguments take them as a tuple.
    pub fn wrap<A, T, Op>(&self, operation: Op) -> impl Fn(A) -> Result<T, Error>
    where
        Op: Fn(A) -> T,
    {
        let gate = self.clone();
        move |args| gate.call(|| operation(args))
    }

    /// Like [`AuthorizationGate::wrap`], for operations that mutate captured state.
    pub fn wrap_mut<A, T, Op>(&self, mut operation: Op) -> impl FnMut(A) -> Result<T, Error>
    where
        Op: FnMut(A) -> T,
    {
        let gate = self.clone();
        move |args| gate.call(|| operation(args))
    }
}

/// Build a gate from a rule and a failure hook.
pub fn authorization_gate<C, H>(is_authorized: C, on_fail: H) -> AuthorizationGate
where
    C: Check + 'static,
    H: FailureHandler + 'static,
{
    AuthorizationGate::new(is_authorized, on_fail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    fn counter() -> Arc<AtomicUsize> {
        Arc::new(AtomicUsize::new(0))
    }

    fn counting_hook(count: &Arc<AtomicUsize>) -> impl Fn() + Send + Sync + 'static {
        let count = Arc::clone(count);
        move || {
            count.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_authorized_call_runs_operation_once() {
        let failures = counter();
        let calls = counter();
        let gate = authorization_gate(|| true, counting_hook(&failures));

        let op_calls = Arc::clone(&calls);
        let wrapped = gate.wrap(move |(name, n): (String, usize)| {
            op_calls.fetch_add(1, Ordering::SeqCst);
            format!("{}-{}", name, n)
        });

        assert_eq!(wrapped(("job".to_string(), 3)).unwrap(), "job-3");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(failures.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_denied_call_skips_operation() {
        let failures = counter();
        let calls = counter();
        let gate = authorization_gate(|| false, counting_hook(&failures));

        let op_calls = Arc::clone(&calls);
        let wrapped = gate.wrap(move |_: ()| {
            op_calls.fetch_add(1, Ordering::SeqCst);
        });

        let err = wrapped(()).unwrap_err();
        assert!(err.is_not_authorized());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(failures.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_predicate_evaluated_once_per_call() {
        let evaluations = counter();
        let evals = Arc::clone(&evaluations);
        let gate = AuthorizationGate::new(
            move || {
                evals.fetch_add(1, Ordering::SeqCst);
                true
            },
            || {},
        );
        let wrapped = gate.wrap(|x: i32| x * 2);

        assert_eq!(wrapped(1).unwrap(), 2);
        assert_eq!(wrapped(2).unwrap(), 4);
        assert_eq!(evaluations.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_decision_is_not_cached() {
        let allowed = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&allowed);
        let failures = counter();
        let gate = AuthorizationGate::new(
            move || flag.load(Ordering::SeqCst),
            counting_hook(&failures),
        );
        let wrapped = gate.wrap(|x: i32| x + 1);

        assert_eq!(wrapped(1).unwrap(), 2);
        allowed.store(false, Ordering::SeqCst);
        assert!(wrapped(1).is_err());
        allowed.store(true, Ordering::SeqCst);
        assert_eq!(wrapped(5).unwrap(), 6);
        assert_eq!(failures.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_wrap_mut_updates_state() {
        let gate = AuthorizationGate::new(|| true, || {});
        let mut total = 0;
        {
            let mut add = gate.wrap_mut(|n: i32| {
                total += n;
                total
            });
            assert_eq!(add(2).unwrap(), 2);
            assert_eq!(add(3).unwrap(), 5);
        }
        assert_eq!(total, 5);
    }

    struct HasSession(bool);

    impl Check for HasSession {
        fn eval(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn test_all_of_short_circuits() {
        let evaluations = counter();
        let evals = Arc::clone(&evaluations);
        let checks: Vec<Box<dyn Check>> = vec![
            Box::new(HasSession(false)),
            Box::new(move || {
                evals.fetch_add(1, Ordering::SeqCst);
                true
            }),
        ];
        let gate = AuthorizationGate::new(AllOf::new(checks), || {});

        assert!(gate.call(|| ()).is_err());
        assert_eq!(evaluations.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_gate_shared_across_threads() {
        let failures = counter();
        let gate = AuthorizationGate::new(HasSession(false), counting_hook(&failures));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let gate = gate.clone();
                std::thread::spawn(move || gate.call(|| ()).is_err())
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
        assert_eq!(failures.load(Ordering::SeqCst), 4);
    }
}
