//! # Integration Test Flows
//!
//! A real door service on a loopback socket, driven by the access client or
//! by hand-built requests:
//!
//! 1. **Keypad → door**: a valid code inside policy opens the door
//! 2. **Wrong API key**: the door refuses, the actuator never moves
//! 3. **Stale replay**: an old signed command is refused as unauthenticated
//! 4. **Duration ceiling**: over-long commands are a bad request
//! 5. **Auto-lock**: the door locks again once the window passes

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Local};
    use dk_01_time_policy::{FixedClock, Policy};
    use dk_02_passcode_validator::{Key, KeySet, PasscodeError, TotpSecret};
    use dk_03_signed_request::{
        current_timestamp, AuthorizedApp, RequestSigner, SharedSecret, HMAC_HEADER,
    };
    use dk_04_door_service::{
        DoorService, DoorServiceConfig, RecordingActuator, AUTH_FAILED_BODY,
    };
    use dk_05_access_client::{
        AccessClient, AttachedPolicy, AttemptOutcome, AuthorizationGate, ContactInfo,
        DoorClient, DoorClientError, Enrollment,
    };
    use std::net::SocketAddr;
    use std::sync::Arc;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};
    use tokio::net::TcpListener;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const API_KEY: &[u8] = b"keypad-door-shared-key";

    fn api_key() -> SharedSecret {
        SharedSecret::new(API_KEY.to_vec())
    }

    /// Start a door service on an ephemeral loopback port.
    async fn spawn_door(config: DoorServiceConfig) -> (SocketAddr, Arc<RecordingActuator>) {
        let actuator = Arc::new(RecordingActuator::new());
        let apps = vec![AuthorizedApp::new("keypad", api_key())];
        let service = DoorService::new(config, apps, actuator.clone()).unwrap();

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(service.serve(listener));
        (addr, actuator)
    }

    fn door_client(addr: SocketAddr, secret: SharedSecret) -> DoorClient {
        DoorClient::new("127.0.0.1", addr.port(), secret, Duration::from_secs(2)).unwrap()
    }

    /// Clock at local noon today, and a policy covering all of today.
    fn today() -> (FixedClock, AttachedPolicy) {
        let noon = Local::now()
            .date_naive()
            .and_hms_opt(12, 0, 0)
            .unwrap()
            .and_local_timezone(Local)
            .earliest()
            .unwrap();
        let day = noon.weekday();
        let policy = Policy::parse(&format!("[{:?}:{:?}]00:00->23:59", day, day)).unwrap();
        (FixedClock(noon), AttachedPolicy::Parsed(policy))
    }

    fn keypad(
        secret: &TotpSecret,
        door: DoorClient,
        seconds_granted: i64,
    ) -> AccessClient<KeySet<Enrollment>, DoorClient> {
        let (clock, policy) = today();
        let enrollment = Enrollment {
            contact: ContactInfo {
                email: "ada@example.com".into(),
            },
            policy,
        };
        let keys = KeySet::new(
            vec![Key::new("Ada", secret.clone(), enrollment)],
            Duration::from_secs(3),
        )
        .with_callback(AuthorizationGate::new(clock));
        AccessClient::new(keys, door, seconds_granted)
    }

    fn current_code(secret: &TotpSecret) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        secret.generate_code(now).unwrap()
    }

    // =============================================================================
    // KEYPAD → DOOR
    // =============================================================================

    #[tokio::test]
    async fn test_valid_code_opens_door() {
        let (addr, actuator) = spawn_door(DoorServiceConfig::default()).await;
        let secret = TotpSecret::generate();
        let client = keypad(&secret, door_client(addr, api_key()), 5);

        let outcome = client.handle_attempt(&current_code(&secret)).await;
        assert!(matches!(outcome, AttemptOutcome::Opened { ref name } if name == "Ada"));
        assert_eq!(actuator.activations(), 1);
        assert!(actuator.is_active());
    }

    #[tokio::test]
    async fn test_wrong_code_never_reaches_door() {
        let (addr, actuator) = spawn_door(DoorServiceConfig::default()).await;
        let secret = TotpSecret::generate();
        let client = keypad(&secret, door_client(addr, api_key()), 5);

        let good = current_code(&secret);
        let bad = if good == "123456" { "654321" } else { "123456" };
        assert!(matches!(
            client.handle_attempt(bad).await,
            AttemptOutcome::Refused(PasscodeError::InvalidCode)
        ));
        assert!(matches!(
            client.handle_attempt(&good).await,
            AttemptOutcome::Refused(PasscodeError::RateLimited)
        ));
        assert_eq!(actuator.activations(), 0);
    }

    #[tokio::test]
    async fn test_wrong_api_key_refused() {
        let (addr, actuator) = spawn_door(DoorServiceConfig::default()).await;
        let secret = TotpSecret::generate();
        let stranger = SharedSecret::new(b"not-the-door-key".to_vec());
        let client = keypad(&secret, door_client(addr, stranger), 5);

        match client.handle_attempt(&current_code(&secret)).await {
            AttemptOutcome::DoorFailed {
                error: DoorClientError::Rejected { status, body },
                ..
            } => {
                assert_eq!(status, 401);
                assert_eq!(body, AUTH_FAILED_BODY);
            }
            other => panic!("expected refusal, got {:?}", other),
        }
        assert_eq!(actuator.activations(), 0);
    }

    #[tokio::test]
    async fn test_duration_over_ceiling_is_bad_request() {
        let (addr, actuator) = spawn_door(DoorServiceConfig::default()).await;
        let secret = TotpSecret::generate();
        let client = keypad(&secret, door_client(addr, api_key()), 15);

        match client.handle_attempt(&current_code(&secret)).await {
            AttemptOutcome::DoorFailed {
                error: DoorClientError::Rejected { status, body },
                ..
            } => {
                assert_eq!(status, 400);
                assert_eq!(body, "Can only open door for between 1 and 10 seconds.");
            }
            other => panic!("expected bad request, got {:?}", other),
        }
        assert_eq!(actuator.activations(), 0);
    }

    // =============================================================================
    // RAW REQUESTS
    // =============================================================================

    #[tokio::test]
    async fn test_stale_replay_refused() {
        let (addr, actuator) = spawn_door(DoorServiceConfig::default()).await;
        let signed = RequestSigner::new(api_key()).sign_unlock_at(3, current_timestamp() - 60);

        let response = reqwest::Client::new()
            .post(format!("http://{}/", addr))
            .header(HMAC_HEADER, signed.tag)
            .body(signed.body)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 401);
        assert_eq!(response.text().await.unwrap(), AUTH_FAILED_BODY);
        assert_eq!(actuator.activations(), 0);
    }

    #[tokio::test]
    async fn test_local_only_accepts_loopback() {
        let config = DoorServiceConfig {
            local_only: true,
            ..Default::default()
        };
        let (addr, actuator) = spawn_door(config).await;
        let signed = RequestSigner::new(api_key()).sign_unlock(2);

        let response = reqwest::Client::new()
            .post(format!("http://{}/", addr))
            .header(HMAC_HEADER, signed.tag)
            .body(signed.body)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);
        assert_eq!(
            response.text().await.unwrap(),
            "Success, door opening for 2 seconds"
        );
        assert_eq!(actuator.activations(), 1);
    }

    #[tokio::test]
    async fn test_door_locks_after_window() {
        let (addr, actuator) = spawn_door(DoorServiceConfig::default()).await;
        let secret = TotpSecret::generate();
        let client = keypad(&secret, door_client(addr, api_key()), 1);

        client.handle_attempt(&current_code(&secret)).await;
        assert!(actuator.is_active());

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(!actuator.is_active());
        assert_eq!(actuator.deactivations(), 1);
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (addr, _) = spawn_door(DoorServiceConfig::default()).await;
        let response = reqwest::get(format!("http://{}/health", addr))
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);
        assert_eq!(response.text().await.unwrap(), "ok");
    }
}
