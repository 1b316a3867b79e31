#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use serde_json::json;

    use crate::core::{
        AuthDispatcher, AuthError, AuthRequest, AuthTransport, AvatarFile, Config, Credentials,
        Field, FormState, Mode, PartBody, ProfileDraft, SubmitPhase, ToastKind,
        ToastQueue, ToastState, TransportResponse, UserRecord, toggle_mode,
    };

    /// Records every request and answers with a scripted result
    struct FakeTransport {
        requests: RefCell<Vec<AuthRequest>>,
        reply: Result<TransportResponse, AuthError>,
        gate: Rc<Cell<SubmitPhase>>,
        phase_during_send: Cell<Option<SubmitPhase>>,
    }

    impl FakeTransport {
        fn new(gate: Rc<Cell<SubmitPhase>>, reply: Result<TransportResponse, AuthError>) -> Self {
            Self {
                requests: RefCell::new(Vec::new()),
                reply,
                gate,
                phase_during_send: Cell::new(None),
            }
        }

        fn ok(gate: Rc<Cell<SubmitPhase>>, status: u16, body: &str) -> Self {
            Self::new(gate, Ok(TransportResponse::new(status, body)))
        }
    }

    impl AuthTransport for FakeTransport {
        async fn send(&self, request: AuthRequest) -> Result<TransportResponse, AuthError> {
            self.phase_during_send.set(Some(self.gate.get()));
            self.requests.borrow_mut().push(request);
            self.reply.clone()
        }
    }

    struct Harness {
        gate: Rc<Cell<SubmitPhase>>,
        toasts: RefCell<ToastQueue>,
        session: RefCell<Option<UserRecord>>,
        dispatcher: AuthDispatcher<FakeTransport>,
    }

    impl Harness {
        fn new(make: impl FnOnce(Rc<Cell<SubmitPhase>>) -> FakeTransport) -> Self {
            let gate = Rc::new(Cell::new(SubmitPhase::Idle));
            let transport = make(gate.clone());
            Self {
                gate,
                toasts: RefCell::new(ToastQueue::new()),
                session: RefCell::new(None),
                dispatcher: AuthDispatcher::new(Config::new("http://chat.test"), transport),
            }
        }

        async fn login(&self, username: &str, password: &str) -> Result<UserRecord, AuthError> {
            let credentials = Credentials {
                username: username.to_string(),
                password: password.to_string(),
            };
            self.dispatcher
                .login(&*self.gate, &self.toasts, &self.session, &credentials)
                .await
        }

        async fn sign_up(&self, draft: &ProfileDraft) -> Result<UserRecord, AuthError> {
            self.dispatcher
                .sign_up(&*self.gate, &self.toasts, &self.session, draft)
                .await
        }

        fn requests(&self) -> Vec<AuthRequest> {
            self.dispatcher.transport().requests.borrow().clone()
        }

        /// The single toast, which must exist
        fn only_toast(&self) -> ToastState {
            let queue = self.toasts.borrow();
            assert_eq!(queue.len(), 1, "expected exactly one toast");
            queue.iter().next().map(|t| t.state.clone()).unwrap()
        }
    }

    fn draft(avatar: Option<AvatarFile>) -> ProfileDraft {
        ProfileDraft {
            name: "Alice".to_string(),
            bio: "hello".to_string(),
            username: "alice".to_string(),
            password: "secret".to_string(),
            avatar,
        }
    }

    // ========================================================================
    // Login
    // ========================================================================

    #[tokio::test]
    async fn test_login_success_publishes_user_and_resolves_toast() {
        let harness = Harness::new(|gate| {
            FakeTransport::ok(gate, 200, r#"{"user":{"id":1},"message":"Welcome"}"#)
        });

        let user = harness.login("alice", "secret").await.unwrap();

        assert_eq!(user, UserRecord(json!({"id": 1})));
        assert_eq!(*harness.session.borrow(), Some(UserRecord(json!({"id": 1}))));
        assert_eq!(
            harness.only_toast(),
            ToastState::Resolved {
                kind: ToastKind::Success,
                text: "Welcome".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_login_sends_exactly_one_json_post() {
        let harness = Harness::new(|gate| {
            FakeTransport::ok(gate, 200, r#"{"user":{"id":1},"message":"Welcome"}"#)
        });

        harness.login("alice", "secret").await.unwrap();

        let requests = harness.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0],
            AuthRequest::Json {
                url: "http://chat.test/api/v1/user/login".to_string(),
                body: json!({"username": "alice", "password": "secret"}),
            }
        );
    }

    #[tokio::test]
    async fn test_login_server_error_shows_message_and_skips_session() {
        let harness = Harness::new(|gate| {
            FakeTransport::ok(gate, 401, r#"{"message":"Invalid credentials"}"#)
        });

        let result = harness.login("alice", "wrong").await;

        assert_eq!(
            result,
            Err(AuthError::Server {
                status: 401,
                message: Some("Invalid credentials".to_string())
            })
        );
        assert!(harness.session.borrow().is_none());
        assert_eq!(
            harness.only_toast(),
            ToastState::Resolved {
                kind: ToastKind::Error,
                text: "Invalid credentials".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_login_network_failure_shows_fallback() {
        let harness = Harness::new(|gate| {
            FakeTransport::new(gate, Err(AuthError::Transport("connection refused".to_string())))
        });

        let result = harness.login("alice", "secret").await;

        assert!(matches!(result, Err(AuthError::Transport(_))));
        assert!(harness.session.borrow().is_none());
        assert_eq!(
            harness.only_toast(),
            ToastState::Resolved {
                kind: ToastKind::Error,
                text: "Something Went Wrong".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_login_error_without_message_shows_fallback() {
        let harness = Harness::new(|gate| FakeTransport::ok(gate, 500, ""));

        harness.login("alice", "secret").await.unwrap_err();

        assert_eq!(harness.only_toast().text(), "Something Went Wrong");
    }

    #[tokio::test]
    async fn test_login_null_user_is_not_published() {
        let harness = Harness::new(|gate| {
            FakeTransport::ok(gate, 200, r#"{"user":null,"message":"Welcome"}"#)
        });

        let result = harness.login("alice", "secret").await;

        assert!(matches!(result, Err(AuthError::Decode(_))));
        assert!(harness.session.borrow().is_none());
        assert_eq!(
            harness.only_toast(),
            ToastState::Resolved {
                kind: ToastKind::Error,
                text: "Something Went Wrong".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_success_without_message_uses_default_text() {
        let harness = Harness::new(|gate| FakeTransport::ok(gate, 200, r#"{"user":{"id":1}}"#));

        harness.login("alice", "secret").await.unwrap();

        assert_eq!(harness.only_toast().text(), "Logged In");
    }

    // ========================================================================
    // Loading gate
    // ========================================================================

    #[tokio::test]
    async fn test_gate_spans_the_request_on_success() {
        let harness = Harness::new(|gate| {
            FakeTransport::ok(gate, 200, r#"{"user":{"id":1},"message":"Welcome"}"#)
        });
        assert_eq!(harness.gate.get(), SubmitPhase::Idle);

        harness.login("alice", "secret").await.unwrap();

        assert_eq!(
            harness.dispatcher.transport().phase_during_send.get(),
            Some(SubmitPhase::Submitting)
        );
        assert_eq!(harness.gate.get(), SubmitPhase::Idle);
    }

    #[tokio::test]
    async fn test_gate_spans_the_request_on_failure() {
        let harness = Harness::new(|gate| {
            FakeTransport::new(gate, Err(AuthError::Transport("timeout".to_string())))
        });

        harness.login("alice", "secret").await.unwrap_err();

        assert_eq!(
            harness.dispatcher.transport().phase_during_send.get(),
            Some(SubmitPhase::Submitting)
        );
        assert_eq!(harness.gate.get(), SubmitPhase::Idle);

        // The form can be resubmitted right away
        harness.login("alice", "secret").await.unwrap_err();
        assert_eq!(harness.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_busy_gate_sends_nothing_and_shows_nothing() {
        let harness = Harness::new(|gate| {
            FakeTransport::ok(gate, 200, r#"{"user":{"id":1},"message":"Welcome"}"#)
        });
        harness.gate.set(SubmitPhase::Submitting);

        let result = harness.login("alice", "secret").await;

        assert_eq!(result, Err(AuthError::Busy));
        assert!(harness.requests().is_empty());
        assert!(harness.toasts.borrow().is_empty());
        assert!(harness.session.borrow().is_none());
        assert_eq!(harness.gate.get(), SubmitPhase::Submitting);
    }

    #[test]
    fn test_toggle_follows_gate() {
        let gate = Cell::new(SubmitPhase::Idle);
        assert_eq!(toggle_mode(Mode::Login, gate.get()), Ok(Mode::SignUp));

        gate.set(SubmitPhase::Submitting);
        assert_eq!(toggle_mode(Mode::Login, gate.get()), Err(AuthError::Busy));
    }

    // ========================================================================
    // Sign-up
    // ========================================================================

    #[tokio::test]
    async fn test_sign_up_without_avatar_omits_avatar_part() {
        let harness = Harness::new(|gate| {
            FakeTransport::ok(gate, 201, r#"{"user":{"id":2},"message":"Account created"}"#)
        });

        harness.sign_up(&draft(None)).await.unwrap();

        let requests = harness.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url(), "http://chat.test/api/v1/user/new");
        assert_eq!(
            requests[0].part_names(),
            vec!["name", "bio", "username", "password"]
        );
        assert_eq!(
            harness.only_toast(),
            ToastState::Resolved {
                kind: ToastKind::Success,
                text: "Account created".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_sign_up_with_avatar_includes_it_once() {
        let harness = Harness::new(|gate| {
            FakeTransport::ok(gate, 201, r#"{"user":{"id":2},"message":"Account created"}"#)
        });
        let avatar = AvatarFile::new("me.png", "image/png", vec![137, 80, 78, 71]);

        harness.sign_up(&draft(Some(avatar.clone()))).await.unwrap();

        let requests = harness.requests();
        let AuthRequest::Multipart { parts, .. } = &requests[0] else {
            panic!("expected multipart request");
        };
        let avatars: Vec<_> = parts.iter().filter(|p| p.name == "avatar").collect();
        assert_eq!(avatars.len(), 1);
        assert_eq!(avatars[0].body, PartBody::File(avatar));
        assert_eq!(*harness.session.borrow(), Some(UserRecord(json!({"id": 2}))));
    }

    #[tokio::test]
    async fn test_sign_up_failure_keeps_form_values() {
        let harness = Harness::new(|gate| {
            FakeTransport::ok(gate, 409, r#"{"message":"Username already exists"}"#)
        });
        let mut form = FormState::new();
        form.update(Field::Name, "Alice");
        form.update(Field::Bio, "hello");
        form.update(Field::Username, "alice");
        form.update(Field::Password, "secret");
        let before = form.clone();

        harness.sign_up(&form.profile_draft()).await.unwrap_err();

        assert_eq!(form, before);
        assert_eq!(harness.only_toast().text(), "Username already exists");
    }

    #[tokio::test]
    async fn test_toast_is_pending_while_request_runs() {
        struct Inspecting<'a> {
            toasts: &'a RefCell<ToastQueue>,
            seen: RefCell<Vec<ToastState>>,
        }

        impl AuthTransport for Inspecting<'_> {
            async fn send(&self, _request: AuthRequest) -> Result<TransportResponse, AuthError> {
                let states = self.toasts.borrow().iter().map(|t| t.state.clone()).collect();
                *self.seen.borrow_mut() = states;
                Ok(TransportResponse::new(200, r#"{"user":{},"message":"Welcome"}"#))
            }
        }

        let toasts = RefCell::new(ToastQueue::new());
        let session = RefCell::new(None);
        let gate = Cell::new(SubmitPhase::Idle);
        let dispatcher = AuthDispatcher::new(
            Config::new("http://chat.test"),
            Inspecting {
                toasts: &toasts,
                seen: RefCell::new(Vec::new()),
            },
        );
        let credentials = Credentials {
            username: "alice".to_string(),
            password: "secret".to_string(),
        };

        dispatcher
            .login(&gate, &toasts, &session, &credentials)
            .await
            .unwrap();

        assert_eq!(
            *dispatcher.transport().seen.borrow(),
            vec![ToastState::Pending {
                text: "Logging In...".to_string()
            }]
        );
        assert_eq!(toasts.borrow().len(), 1);
    }
}
