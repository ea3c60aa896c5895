//! # Integration Test Flows
//!
//! Drives a `ControlPanel` with a recording sink and a fixed clock, the same
//! way the terminal client drives it with the transport channel.
//!
//! ## Flows Tested:
//!
//! 1. **Inbound snapshot → region**: a slice replaced, only its region redrawn, one log entry
//! 2. **Control → outbound → reply**: optimistic entry first, reactive entry after
//! 3. **Task narration**: start, progress and completion entries in order
//! 4. **Connection flips**: indicator state observable right after each callback

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use panel_core::{
        render, Action, Control, ControlPanel, FixedTimeSource, InboundEvent, ModalBody,
        OutboundEvent, PanelConfig, PanelConfigBuilder, RecordingSink, Region, Service,
        ServiceStatusMap, Severity,
    };
    use proptest::prelude::*;
    use serde_json::json;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn panel() -> ControlPanel<RecordingSink> {
        panel_with(&PanelConfig::default())
    }

    fn panel_with(config: &PanelConfig) -> ControlPanel<RecordingSink> {
        ControlPanel::new(
            config,
            RecordingSink::new(),
            Arc::new(FixedTimeSource::at_hms(9, 30, 5)),
        )
    }

    /// Messages appended after the two startup entries.
    fn messages_since(panel: &ControlPanel<RecordingSink>, skip: usize) -> Vec<(String, Severity)> {
        panel
            .log()
            .entries()
            .skip(skip)
            .map(|e| (e.message.clone(), e.severity.clone()))
            .collect()
    }

    fn status_rows(panel: &ControlPanel<RecordingSink>) -> Vec<(String, String)> {
        panel
            .regions()
            .fragment(Region::Status)
            .lines
            .iter()
            .map(|line| {
                (
                    line.spans[0].content.trim().to_string(),
                    line.spans[1].content.to_string(),
                )
            })
            .collect()
    }

    // =============================================================================
    // END-TO-END SCENARIOS
    // =============================================================================

    #[test]
    fn test_system_status_snapshot_end_to_end() {
        let mut panel = panel();
        let before = panel.log().len();
        let disk_gen = panel.regions().generation(Region::Disk);
        let git_gen = panel.regions().generation(Region::Git);

        panel.on_event(
            "system_status",
            json!({
                "node": true, "git": false, "zsh": true,
                "neovim": false, "gemini": true, "ssh": false
            }),
        );

        assert_eq!(
            status_rows(&panel),
            [
                ("Node.js", "Online"),
                ("Git", "Offline"),
                ("Zsh", "Online"),
                ("Neovim", "Offline"),
                ("Gemini CLI", "Online"),
                ("SSH Server", "Offline"),
            ]
            .map(|(a, b)| (a.to_string(), b.to_string()))
        );
        assert_eq!(
            messages_since(&panel, before),
            vec![("[UPDATE] System status updated".to_string(), Severity::Info)]
        );
        assert_eq!(panel.regions().generation(Region::Disk), disk_gen);
        assert_eq!(panel.regions().generation(Region::Git), git_gen);
    }

    #[test]
    fn test_ssh_key_control_then_reply() {
        let mut panel = panel();
        let before = panel.log().len();
        let key = "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIOq8 user@devhost";

        panel.dispatch(Control::ShowSshKey);

        assert_eq!(
            panel.sink().sent(),
            vec![OutboundEvent::Action(Action::ShowSshKey)]
        );
        assert_eq!(
            panel.sink().sent()[0].payload().unwrap(),
            json!({"type": "show_ssh_key"})
        );
        assert_eq!(panel.log().len(), before + 1);

        panel.on_event("ssh_key", json!({ "key": key }));

        let modal = panel.modals().top().unwrap();
        assert_eq!(modal.body, ModalBody::Secret(key.to_string()));
        assert_eq!(render::modal_fragment(modal).lines[0].spans[0].content, key);
        assert_eq!(
            messages_since(&panel, before),
            vec![
                ("[ACTION] Requesting SSH key...".to_string(), Severity::Info),
                ("[SSH] Public key shown".to_string(), Severity::Success),
            ]
        );
    }

    #[test]
    fn test_optimistic_entry_precedes_reactive_entry() {
        let mut panel = panel();
        let before = panel.log().len();

        panel.dispatch(Control::GeminiAuthStatus);
        panel.on_event("gemini_auth", json!({"authenticated": false}));
        panel.dispatch(Control::GeminiLogin);
        panel.on_event("gemini_auth_flow", json!({"url": "https://accounts.example/login"}));

        let trace: Vec<String> = messages_since(&panel, before)
            .into_iter()
            .map(|(m, _)| m)
            .collect();
        assert_eq!(
            trace,
            [
                "[ACTION] Checking Gemini authentication status...",
                "[GEMINI] Gemini not authenticated",
                "[ACTION] Starting Gemini login...",
                "[GEMINI] Authentication URL shown",
            ]
        );
        assert!(matches!(
            &panel.modals().top().unwrap().body,
            ModalBody::Link { url, .. } if url == "https://accounts.example/login"
        ));
    }

    #[test]
    fn test_every_control_appends_exactly_one_entry() {
        let mut panel = panel();

        for (i, control) in Control::ALL.into_iter().enumerate() {
            let before = panel.log().len();
            panel.dispatch(control);

            assert_eq!(panel.log().len(), before + 1, "{control:?}");
            assert_eq!(panel.sink().sent().len(), i + 1);
            assert_eq!(panel.log().latest().unwrap().message, control.intent());
        }
    }

    // =============================================================================
    // TASK NARRATION
    // =============================================================================

    #[test]
    fn test_module_run_narration() {
        let mut panel = panel();
        let before = panel.log().len();

        panel.run_module("05-ssh-setup").unwrap();
        panel.on_event("task_start", json!({"task": "module:05-ssh-setup"}));
        panel.on_event(
            "task_log",
            json!({"message": "[05-ssh-setup] Generating ed25519 key", "level": "info"}),
        );
        panel.on_event(
            "task_log",
            json!({"message": "[05-ssh-setup] Key already exists", "level": "warning"}),
        );
        panel.on_event(
            "task_complete",
            json!({"task": "module:05-ssh-setup", "exitCode": 0}),
        );

        assert_eq!(
            messages_since(&panel, before),
            vec![
                ("[ACTION] Running module 05-ssh-setup...".to_string(), Severity::Info),
                ("[TASK] Starting module:05-ssh-setup".to_string(), Severity::Info),
                ("[05-ssh-setup] Generating ed25519 key".to_string(), Severity::Info),
                ("[05-ssh-setup] Key already exists".to_string(), Severity::Warning),
                ("[TASK] Finished module:05-ssh-setup (exit 0)".to_string(), Severity::Success),
            ]
        );
    }

    #[test]
    fn test_task_failure_is_only_a_log_line() {
        for code in [1, 127] {
            let mut panel = panel();
            let status = *panel.store().status();

            panel.on_event("task_complete", json!({"task": "start_http_server", "exitCode": code}));

            let entry = panel.log().latest().unwrap();
            assert_eq!(entry.severity, Severity::Error);
            assert_eq!(
                entry.message,
                format!("[TASK] Finished start_http_server (exit {code})")
            );
            assert_eq!(panel.store().status(), &status);
            assert!(panel.modals().is_empty());
        }
    }

    // =============================================================================
    // CONNECTION AND ROBUSTNESS
    // =============================================================================

    #[test]
    fn test_connection_flips_are_immediate() {
        let mut panel = panel();

        for _ in 0..3 {
            panel.on_connect();
            assert!(panel.connection().is_connected());
            panel.on_disconnect();
            assert!(!panel.connection().is_connected());
        }

        let tail: Vec<_> = messages_since(&panel, panel.log().len() - 2);
        assert_eq!(
            tail,
            vec![
                ("[WS] Connected to server".to_string(), Severity::Success),
                ("[WS] Disconnected from server".to_string(), Severity::Error),
            ]
        );
    }

    #[test]
    fn test_malformed_snapshot_keeps_previous_state() {
        let mut panel = panel();
        panel.handle(InboundEvent::SystemStatus(
            ServiceStatusMap::new().with(Service::Ssh, true),
        ));
        let status_gen = panel.regions().generation(Region::Status);

        panel.on_event("system_status", json!(["node"]));
        panel.on_event("git_projects", json!([{"name": "no-branch"}]));
        panel.on_event("ssh_key", json!({}));

        assert!(panel.store().status().is_online(Service::Ssh));
        assert!(panel.store().git().is_empty());
        assert!(panel.modals().is_empty());
        assert_eq!(panel.regions().generation(Region::Status), status_gen);

        let warnings = panel
            .log()
            .entries()
            .filter(|e| e.severity == Severity::Warning)
            .count();
        assert_eq!(warnings, 3);
    }

    #[test]
    fn test_log_retention_is_bounded() {
        let config = PanelConfigBuilder::new().log_capacity(5).build().unwrap();
        let mut panel = panel_with(&config);

        for i in 0..20 {
            panel.on_event("log", json!({"message": format!("line {i}")}));
        }

        assert_eq!(panel.log().len(), 5);
        assert_eq!(panel.log().entries().next().unwrap().message, "line 15");
        assert_eq!(
            panel.regions().fragment(Region::Log).lines.len(),
            5,
            "log region mirrors the retained entries"
        );
    }

    #[test]
    fn test_log_lines_carry_timestamp() {
        let mut panel = panel();
        panel.on_event("log", json!({"message": "hello", "level": "success"}));

        let text = panel.regions().fragment(Region::Log);
        let last = text.lines.last().unwrap();
        assert_eq!(last.spans[0].content, "[09:30:05] hello");
    }

    proptest! {
        #[test]
        fn prop_snapshot_replay_is_idempotent(
            flags in proptest::collection::vec(any::<bool>(), 6)
        ) {
            let payload: serde_json::Map<String, serde_json::Value> = Service::ALL
                .iter()
                .zip(&flags)
                .map(|(s, f)| (s.key().to_string(), json!(f)))
                .collect();

            let mut panel = panel();
            panel.on_event("system_status", payload.clone().into());
            let first = panel.regions().fragment(Region::Status).clone();
            panel.on_event("system_status", payload.into());

            prop_assert_eq!(panel.regions().fragment(Region::Status), &first);
        }
    }
}
