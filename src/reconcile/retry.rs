//! Bounded create-with-rename loop
//!
//! Sonatype Lifecycle rejects a duplicate name with a 400 whose message ends
//! in a fixed phrase. On such a collision the next attempt appends `-<n>`,
//! `n` being the number of the attempt that collided.

use std::future::Future;

use log::{debug, warn};

use crate::error::{ApiError, Error, Result};

/// Collision phrases for organization creates
pub const ORGANIZATION_COLLISION_SUFFIXES: &[&str] = &["used as a name."];

/// Collision phrases for application creates
pub const APPLICATION_COLLISION_SUFFIXES: &[&str] = &["as an ID.", "as a name."];

/// Result of [`retry_create`]
#[derive(Debug)]
pub enum CreateOutcome<T> {
    Success {
        value: T,
        attempts: usize,
    },
    /// Every attempt collided
    CollisionExhausted {
        attempts: usize,
        last_candidate: String,
    },
    /// The last attempt failed for a reason other than a collision
    FatalError {
        attempts: usize,
        cause: Error,
    },
}

fn has_collision_suffix(err: &Error, suffixes: &[&str]) -> bool {
    match err {
        Error::Api(ApiError::BadRequest(body)) => {
            let body = body.trim_end();
            suffixes.iter().any(|s| body.ends_with(s))
        }
        _ => false,
    }
}

pub fn is_organization_collision(err: &Error) -> bool {
    has_collision_suffix(err, ORGANIZATION_COLLISION_SUFFIXES)
}

pub fn is_application_collision(err: &Error) -> bool {
    has_collision_suffix(err, APPLICATION_COLLISION_SUFFIXES)
}

/// Every suffix [`retry_create`] can produce within `max_attempts`: `""`,
/// `-1`, ... `-<max_attempts - 1>`.
pub fn candidate_suffixes(max_attempts: usize) -> impl Iterator<Item = String> {
    std::iter::once(String::new()).chain((1..max_attempts.max(1)).map(|n| format!("-{}", n)))
}

/// Run `create` up to `max_attempts` times.
///
/// `create` receives the suffix to append to every identifying field: empty on
/// the first attempt, `-<n>` after attempt `n` collided. Non-collision failures
/// retry with the same suffix.
pub async fn retry_create<T, F, Fut, P>(
    base: &str,
    max_attempts: usize,
    is_collision: P,
    mut create: F,
) -> CreateOutcome<T>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<T>>,
    P: Fn(&Error) -> bool,
{
    let max_attempts = max_attempts.max(1);
    let mut suffix = String::new();
    let mut last_error: Option<Error> = None;
    let mut last_collided = false;
    let mut last_candidate = base.to_string();

    for attempt in 1..=max_attempts {
        last_candidate = format!("{}{}", base, suffix);
        match create(suffix.clone()).await {
            Ok(value) => {
                return CreateOutcome::Success {
                    value,
                    attempts: attempt,
                };
            }
            Err(e) if is_collision(&e) => {
                debug!("'{}' is already in use (attempt {})", last_candidate, attempt);
                suffix = format!("-{}", attempt);
                last_collided = true;
                last_error = Some(e);
            }
            Err(e) => {
                warn!(
                    "Creating '{}' failed on attempt {}/{}: {}",
                    last_candidate, attempt, max_attempts, e
                );
                last_collided = false;
                last_error = Some(e);
            }
        }
    }

    if last_collided {
        CreateOutcome::CollisionExhausted {
            attempts: max_attempts,
            last_candidate,
        }
    } else {
        CreateOutcome::FatalError {
            attempts: max_attempts,
            cause: last_error
                .unwrap_or_else(|| Error::Other(format!("no attempt made for '{}'", base))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;

    fn bad_request(body: &str) -> Error {
        ApiError::BadRequest(body.to_string()).into()
    }

    /// Replays scripted results and records every candidate it was asked for.
    struct Script {
        results: RefCell<VecDeque<Result<&'static str>>>,
        seen: RefCell<Vec<String>>,
    }

    impl Script {
        fn new(results: Vec<Result<&'static str>>) -> Self {
            Self {
                results: RefCell::new(results.into()),
                seen: RefCell::new(Vec::new()),
            }
        }

        async fn call(&self, candidate: String) -> Result<&'static str> {
            self.seen.borrow_mut().push(candidate);
            self.results
                .borrow_mut()
                .pop_front()
                .unwrap_or(Ok("unexpected"))
        }
    }

    #[test]
    fn test_collision_detection_ignores_trailing_whitespace() {
        assert!(is_organization_collision(&bad_request(
            "Organization 'X' is already used as a name.\n"
        )));
        assert!(is_application_collision(&bad_request(
            "Application 'x' is already used as an ID."
        )));
        assert!(is_application_collision(&bad_request(
            "Application 'X' is already used as a name.  "
        )));
        assert!(!is_organization_collision(&bad_request(
            "Application 'x' is already used as an ID."
        )));
        assert!(!is_organization_collision(&bad_request("Invalid name")));
        assert!(!is_organization_collision(&ApiError::Unauthorized.into()));
    }

    #[tokio::test]
    async fn test_two_collisions_then_success() {
        let script = Script::new(vec![
            Err(bad_request("X is already used as a name.")),
            Err(bad_request("X-1 is already used as a name.")),
            Ok("created"),
        ]);

        let outcome = retry_create("X", 3, is_organization_collision, |suffix| {
            script.call(format!("X{}", suffix))
        })
        .await;

        match outcome {
            CreateOutcome::Success { value, attempts } => {
                assert_eq!(value, "created");
                assert_eq!(attempts, 3);
            }
            other => panic!("expected success, got {:?}", other),
        }
        assert_eq!(*script.seen.borrow(), vec!["X", "X-1", "X-2"]);
    }

    #[tokio::test]
    async fn test_non_collision_failures_stop_after_budget() {
        let script = Script::new(vec![
            Err(bad_request("Invalid")),
            Err(bad_request("Invalid")),
            Err(bad_request("Invalid")),
            Ok("never"),
        ]);

        let outcome = retry_create("X", 3, is_organization_collision, |suffix| {
            script.call(format!("X{}", suffix))
        })
        .await;

        match outcome {
            CreateOutcome::FatalError { attempts, cause } => {
                assert_eq!(attempts, 3);
                assert!(cause.to_string().contains("Invalid"));
            }
            other => panic!("expected fatal error, got {:?}", other),
        }
        assert_eq!(*script.seen.borrow(), vec!["X", "X", "X"]);
    }

    #[tokio::test]
    async fn test_collisions_exhaust_budget() {
        let script = Script::new(vec![
            Err(bad_request("used as a name.")),
            Err(bad_request("used as a name.")),
            Err(bad_request("used as a name.")),
        ]);

        let outcome = retry_create("X", 3, is_organization_collision, |suffix| {
            script.call(format!("X{}", suffix))
        })
        .await;

        match outcome {
            CreateOutcome::CollisionExhausted {
                attempts,
                last_candidate,
            } => {
                assert_eq!(attempts, 3);
                assert_eq!(last_candidate, "X-2");
            }
            other => panic!("expected collision exhaustion, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_first_attempt_success_uses_base() {
        let script = Script::new(vec![Ok("created")]);

        let outcome = retry_create("X", 3, is_organization_collision, |suffix| {
            script.call(format!("X{}", suffix))
        })
        .await;

        assert!(matches!(
            outcome,
            CreateOutcome::Success { attempts: 1, .. }
        ));
        assert_eq!(*script.seen.borrow(), vec!["X"]);
    }

    #[tokio::test]
    async fn test_collision_after_non_collision_keeps_attempt_numbering() {
        let script = Script::new(vec![
            Err(ApiError::ServerError("boom".to_string()).into()),
            Err(bad_request("X is already used as a name.")),
            Ok("created"),
        ]);

        let outcome = retry_create("X", 3, is_organization_collision, |suffix| {
            script.call(format!("X{}", suffix))
        })
        .await;

        assert!(matches!(
            outcome,
            CreateOutcome::Success { attempts: 3, .. }
        ));
        assert_eq!(*script.seen.borrow(), vec!["X", "X", "X-2"]);
    }

    #[test]
    fn test_candidate_suffixes_follow_attempt_budget() {
        let suffixes: Vec<String> = candidate_suffixes(3).collect();
        assert_eq!(suffixes, vec!["", "-1", "-2"]);
        assert_eq!(candidate_suffixes(0).collect::<Vec<_>>(), vec![""]);
    }
}
