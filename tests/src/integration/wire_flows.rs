//! # Wire Flows
//!
//! Socket.IO text frames decoded by the codec and fed into the panel, and
//! the panel's outbound events encoded back into frames.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use panel_core::wire::{EnginePacket, SocketPacket};
    use panel_core::{
        Control, ControlPanel, FixedTimeSource, GitProject, OutboundEvent, PanelConfig,
        RecordingSink, Region, Severity,
    };

    fn panel() -> ControlPanel<RecordingSink> {
        ControlPanel::new(
            &PanelConfig::default(),
            RecordingSink::new(),
            Arc::new(FixedTimeSource::at_hms(14, 0, 0)),
        )
    }

    /// Feed one server frame the way the transport does.
    fn feed(panel: &mut ControlPanel<RecordingSink>, frame: &str) {
        match EnginePacket::decode(frame).unwrap() {
            EnginePacket::Message(SocketPacket::Event { name, data, .. }) => {
                panel.on_event(&name, data)
            }
            EnginePacket::Message(SocketPacket::Connect { .. }) => panel.on_connect(),
            EnginePacket::Close | EnginePacket::Message(SocketPacket::Disconnect { .. }) => {
                panel.on_disconnect()
            }
            _ => {}
        }
    }

    fn encode(event: &OutboundEvent) -> String {
        EnginePacket::Message(SocketPacket::event(event.name(), event.payload().unwrap())).encode()
    }

    #[test]
    fn test_session_from_frames() {
        let mut panel = panel();

        feed(&mut panel, r#"40{"sid":"Y3BsYXNo"}"#);
        feed(&mut panel, r#"42["disk_usage",{"Home Total":"2.3G","Downloads":"410M"}]"#);
        feed(
            &mut panel,
            r#"42["git_projects",[{"name":"dotfiles","branch":"main","hasChanges":true,"path":"/home/u/dotfiles","lastCommit":"4f2a1c0 tweak prompt"}]]"#,
        );

        assert!(panel.connection().is_connected());
        assert_eq!(panel.store().disk().get("Downloads"), Some("410M"));
        assert_eq!(
            panel.store().git(),
            &[GitProject::new("dotfiles", "main", true)
                .with_path("/home/u/dotfiles")
                .with_last_commit("4f2a1c0 tweak prompt")]
        );
        assert_eq!(panel.regions().fragment(Region::Disk).lines.len(), 2);
        assert_eq!(panel.regions().fragment(Region::Git).lines.len(), 3);

        feed(&mut panel, "41");
        assert!(!panel.connection().is_connected());
        assert_eq!(panel.log().latest().unwrap().severity, Severity::Error);
    }

    #[test]
    fn test_controls_encode_to_action_frames() {
        let mut panel = panel();
        for control in Control::ALL {
            panel.dispatch(control);
        }

        let frames: Vec<String> = panel.sink().sent().iter().map(encode).collect();
        assert_eq!(
            frames,
            [
                r#"42["action",{"type":"show_ssh_key"}]"#,
                r#"42["action",{"type":"enable_ssh"}]"#,
                r#"42["action",{"type":"start_http_server"}]"#,
                r#"42["action",{"type":"gemini_auth_status"}]"#,
                r#"42["action",{"type":"gemini_login"}]"#,
                r#"42["action",{"type":"test_github_ssh"}]"#,
                r#"42["action",{"type":"show_ssh_key"}]"#,
            ]
        );
    }

    #[test]
    fn test_parameterised_actions_encode_params() {
        let mut panel = panel();
        feed(
            &mut panel,
            r#"42["git_projects",[{"name":"blog","branch":"main","hasChanges":false,"path":"/srv/blog"}]]"#,
        );

        panel.run_module("07-local-ssh-server").unwrap();
        panel.set_repo_remote_ssh(0).unwrap();

        let frames: Vec<String> = panel.sink().sent().iter().map(encode).collect();
        assert_eq!(
            frames,
            [
                r#"42["action",{"params":{"name":"07-local-ssh-server"},"type":"run_module"}]"#,
                r#"42["action",{"params":{"path":"/srv/blog"},"type":"set_repo_remote_ssh"}]"#,
            ]
        );
    }

    #[test]
    fn test_unknown_event_frame_is_ignored() {
        let mut panel = panel();
        let before = panel.log().len();

        feed(&mut panel, r#"42["metrics",{"cpu":12}]"#);

        assert_eq!(panel.log().len(), before);
    }
}
