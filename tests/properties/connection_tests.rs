//! Command-line construction invariants for connection records.

use proptest::prelude::*;

use grasshopper::connection::{DirectConnection, PortForward, SshCommand};

proptest! {
    #[test]
    fn direct_ends_with_port(user in "[a-z]{1,8}", host in "[a-z0-9.]{1,16}", port in 1u16..) {
        let conn = DirectConnection {
            user: user.clone(),
            host: host.clone(),
            port,
            ..DirectConnection::default()
        };
        let args = conn.ssh_args();
        prop_assert_eq!(args.len(), 3);
        prop_assert_eq!(&args[0], &format!("{user}@{host}"));
        prop_assert_eq!(&args[2], &port.to_string());
    }

    #[test]
    fn key_adds_identity_flag_first(key in "[a-zA-Z0-9/ _.-]{1,30}") {
        let conn = PortForward {
            key: key.clone(),
            target_host: "db".to_string(),
            remote_server_user: "u".to_string(),
            remote_server_host: "h".to_string(),
            ..PortForward::default()
        };
        let args = conn.ssh_args();
        prop_assert_eq!(&args[0], "-i");
        prop_assert_eq!(&args[1], &key);
        prop_assert!(conn.command_line().starts_with("ssh -i "));
    }

    #[test]
    fn duplicate_only_changes_name(name in ".{0,20}") {
        let conn = DirectConnection {
            name: name.clone(),
            host: "h".to_string(),
            ..DirectConnection::default()
        };
        let copy = conn.duplicate();
        prop_assert_eq!(copy.name, format!("{name} (Copy)"));
        prop_assert_eq!(copy.host, conn.host);
        prop_assert_eq!(copy.port, conn.port);
    }
}
