//! # Access Client Service
//!
//! The entry loop: read a code, validate it, and when the person is allowed
//! in, tell the door to open.

use crate::domain::account::Enrollment;
use crate::domain::errors::DoorClientError;
use crate::ports::outbound::DoorGateway;
use dk_02_passcode_validator::{PasscodeError, PasscodeValidator};
use std::io::ErrorKind;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::runtime::{Handle, RuntimeFlavor};
use tracing::{error, info, warn};

pub const PROMPT: &str = "Please enter 6-digit code: ";

/// What came of one line of input.
#[derive(Debug)]
pub enum AttemptOutcome {
    /// Nothing typed
    Blank,
    /// Code refused: rate limited, unknown, or outside policy
    Refused(PasscodeError),
    /// Door told to open for this person
    Opened { name: String },
    /// Person allowed in but the door could not be reached
    DoorFailed {
        name: String,
        error: DoorClientError,
    },
}

pub struct AccessClient<V, G> {
    validator: V,
    door: G,
    seconds_granted: i64,
}

impl<V, G> AccessClient<V, G>
where
    V: PasscodeValidator<Enrollment>,
    G: DoorGateway,
{
    pub fn new(validator: V, door: G, seconds_granted: i64) -> Self {
        Self {
            validator,
            door,
            seconds_granted,
        }
    }

    pub fn validator(&self) -> &V {
        &self.validator
    }

    /// Handle one line of keypad input.
    pub async fn handle_attempt(&self, line: &str) -> AttemptOutcome {
        let code = line.trim();
        if code.is_empty() {
            return AttemptOutcome::Blank;
        }

        let name = match self.validate(code) {
            Ok(name) => name,
            Err(e) => {
                warn!(error = %e, "Passcode refused");
                return AttemptOutcome::Refused(e);
            }
        };

        match self.door.open_for(self.seconds_granted).await {
            Ok(()) => {
                info!(name = %name, seconds = self.seconds_granted, "Door opened");
                AttemptOutcome::Opened { name }
            }
            Err(error) => {
                error!(name = %name, error = %error, "Failed to open door");
                AttemptOutcome::DoorFailed { name, error }
            }
        }
    }

    /// Key validation fans out on the rayon pool and blocks until it joins;
    /// keep that off the async workers when the runtime allows it.
    fn validate(&self, code: &str) -> Result<String, PasscodeError> {
        let check = || {
            self.validator
                .validate(code)
                .map(|key| key.name().to_string())
        };
        match Handle::try_current().map(|handle| handle.runtime_flavor()) {
            Ok(RuntimeFlavor::MultiThread) => tokio::task::block_in_place(check),
            _ => check(),
        }
    }

    /// Prompt, read and handle lines until `input` ends.
    ///
    /// A line that is not UTF-8 is skipped; any other read error ends the
    /// loop.
    pub async fn run<R, W>(&self, input: R, mut output: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        loop {
            output.write_all(PROMPT.as_bytes()).await?;
            output.flush().await?;

            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => return Ok(()),
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    warn!(error = %e, "Skipping unreadable input line");
                    continue;
                }
                Err(e) => {
                    error!(error = %e, "Failed to read input");
                    return Err(e);
                }
            };
            self.handle_attempt(&line).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::{AttachedPolicy, ContactInfo};
    use crate::gate::AuthorizationGate;
    use async_trait::async_trait;
    use chrono::{Datelike, Local};
    use dk_01_time_policy::{FixedClock, Policy};
    use dk_02_passcode_validator::{Key, KeySet, TotpSecret};
    use std::pin::Pin;
    use std::sync::Mutex;
    use std::task::{Context, Poll};
    use std::time::{Duration, SystemTime, UNIX_EPOCH};
    use tokio::io::{AsyncRead, ReadBuf};

    #[derive(Default)]
    struct FakeDoor {
        opened: Mutex<Vec<i64>>,
        fail: bool,
    }

    #[async_trait]
    impl DoorGateway for FakeDoor {
        async fn open_for(&self, seconds: i64) -> Result<(), DoorClientError> {
            if self.fail {
                return Err(DoorClientError::Rejected {
                    status: 401,
                    body: "Authentication failed".into(),
                });
            }
            self.opened.lock().unwrap().push(seconds);
            Ok(())
        }
    }

    fn now_secs() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
    }

    fn enrolled(name: &str, secret: TotpSecret, policy: &str) -> Key<Enrollment> {
        let enrollment = Enrollment {
            contact: ContactInfo {
                email: format!("{}@example.com", name.to_lowercase()),
            },
            policy: AttachedPolicy::Parsed(Policy::parse(policy).unwrap()),
        };
        Key::new(name, secret, enrollment)
    }

    /// Policy covering the whole of today's weekday, checked at local noon.
    fn today_policy() -> (String, FixedClock) {
        let noon = Local::now()
            .date_naive()
            .and_hms_opt(12, 0, 0)
            .unwrap()
            .and_local_timezone(Local)
            .earliest()
            .unwrap();
        let day = noon.weekday();
        (format!("[{:?}:{:?}]00:00->23:59", day, day), FixedClock(noon))
    }

    fn client(
        secret: &TotpSecret,
        policy: &str,
        clock: FixedClock,
        door: FakeDoor,
    ) -> AccessClient<KeySet<Enrollment>, FakeDoor> {
        let keys = KeySet::new(
            vec![enrolled("Ada", secret.clone(), policy)],
            Duration::from_secs(3),
        )
        .with_callback(AuthorizationGate::new(clock));
        AccessClient::new(keys, door, 5)
    }

    #[tokio::test]
    async fn test_valid_code_opens_door() {
        let secret = TotpSecret::generate();
        let (policy, clock) = today_policy();
        let client = client(&secret, &policy, clock, FakeDoor::default());

        let code = secret.generate_code(now_secs()).unwrap();
        let outcome = client.handle_attempt(&format!("  {}\n", code)).await;
        assert!(matches!(outcome, AttemptOutcome::Opened { ref name } if name == "Ada"));
        assert_eq!(*client.door.opened.lock().unwrap(), vec![5]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_valid_code_on_multi_thread_runtime() {
        let secret = TotpSecret::generate();
        let (policy, clock) = today_policy();
        let client = client(&secret, &policy, clock, FakeDoor::default());

        let code = secret.generate_code(now_secs()).unwrap();
        let outcome = client.handle_attempt(&code).await;
        assert!(matches!(outcome, AttemptOutcome::Opened { ref name } if name == "Ada"));
        assert_eq!(*client.door.opened.lock().unwrap(), vec![5]);
    }

    #[tokio::test]
    async fn test_outside_policy_never_reaches_door() {
        let secret = TotpSecret::generate();
        let (_, clock) = today_policy();
        let other_day = clock.0.weekday().succ();
        let policy = format!("[{:?}:{:?}]00:00->23:59", other_day, other_day);
        let client = client(&secret, &policy, clock, FakeDoor::default());

        let code = secret.generate_code(now_secs()).unwrap();
        match client.handle_attempt(&code).await {
            AttemptOutcome::Refused(PasscodeError::AuthorizationDenied { name, reason }) => {
                assert_eq!(name, "Ada");
                assert_eq!(reason, "Ada is not permitted to enter at this time.");
            }
            other => panic!("expected denial, got {:?}", other),
        }
        assert!(client.door.opened.lock().unwrap().is_empty());
        assert!(client.validator().is_rate_limited());
    }

    #[tokio::test]
    async fn test_wrong_code_then_rate_limited() {
        let secret = TotpSecret::generate();
        let (policy, clock) = today_policy();
        let client = client(&secret, &policy, clock, FakeDoor::default());

        let good = secret.generate_code(now_secs()).unwrap();
        let bad = if good == "000000" { "111111" } else { "000000" };
        assert!(matches!(
            client.handle_attempt(bad).await,
            AttemptOutcome::Refused(PasscodeError::InvalidCode)
        ));
        assert!(matches!(
            client.handle_attempt(&good).await,
            AttemptOutcome::Refused(PasscodeError::RateLimited)
        ));
        assert!(client.door.opened.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_line_is_not_an_attempt() {
        let secret = TotpSecret::generate();
        let (policy, clock) = today_policy();
        let client = client(&secret, &policy, clock, FakeDoor::default());

        assert!(matches!(
            client.handle_attempt(" \r\n").await,
            AttemptOutcome::Blank
        ));
        assert!(!client.validator().is_rate_limited());
    }

    #[tokio::test]
    async fn test_door_failure_reported() {
        let secret = TotpSecret::generate();
        let (policy, clock) = today_policy();
        let door = FakeDoor {
            fail: true,
            ..Default::default()
        };
        let client = client(&secret, &policy, clock, door);

        let code = secret.generate_code(now_secs()).unwrap();
        assert!(matches!(
            client.handle_attempt(&code).await,
            AttemptOutcome::DoorFailed {
                error: DoorClientError::Rejected { status: 401, .. },
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_run_prompts_per_line() {
        let secret = TotpSecret::generate();
        let (policy, clock) = today_policy();
        let client = client(&secret, &policy, clock, FakeDoor::default());

        let code = secret.generate_code(now_secs()).unwrap();
        let input = format!("\n{}\n", code);
        let mut output = Vec::new();
        client
            .run(tokio::io::BufReader::new(input.as_bytes()), &mut output)
            .await
            .unwrap();

        // Two lines read, then a final prompt before end of input
        assert_eq!(String::from_utf8(output).unwrap(), PROMPT.repeat(3));
        assert_eq!(*client.door.opened.lock().unwrap(), vec![5]);
    }

    /// Reader whose device has gone away.
    struct BrokenInput {
        reads: usize,
    }

    impl AsyncRead for BrokenInput {
        fn poll_read(
            mut self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            _buf: &mut ReadBuf<'_>,
        ) -> Poll<std::io::Result<()>> {
            self.reads += 1;
            Poll::Ready(Err(std::io::Error::other("input/output error")))
        }
    }

    #[tokio::test]
    async fn test_run_stops_on_read_failure() {
        let secret = TotpSecret::generate();
        let (policy, clock) = today_policy();
        let client = client(&secret, &policy, clock, FakeDoor::default());

        let mut input = tokio::io::BufReader::new(BrokenInput { reads: 0 });
        let mut output = Vec::new();
        let result = client.run(&mut input, &mut output).await;

        assert_eq!(result.unwrap_err().kind(), ErrorKind::Other);
        assert_eq!(input.get_ref().reads, 1);
        assert_eq!(String::from_utf8(output).unwrap(), PROMPT);
    }
}
