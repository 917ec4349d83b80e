//  ██████╗  █████╗ ███████╗███████╗██╗███╗   ██╗ ██████╗
//  ██╔══██╗██╔══██╗██╔════╝██╔════╝██║████╗  ██║██╔════╝
//  ██████╔╝███████║███████╗███████╗██║██╔██╗ ██║██║  ███╗
//  ██╔═══╝ ██╔══██║╚════██║╚════██║██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║███████║███████║██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#![cfg(feature = "web")]

#[cfg(test)]
mod passing {
    use assert_cmd::Command;

    #[test]
    fn print_help_information() {
        let output = Command::cargo_bin("html-translator-web")
            .unwrap()
            .arg("--help")
            .output()
            .unwrap();

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("--bind"));
        assert!(stdout.contains("--port"));
        assert!(stdout.contains("--log-level"));
        assert!(stdout.contains("--env-docs"));
    }

    #[test]
    fn print_environment_variables() {
        let output = Command::cargo_bin("html-translator-web")
            .unwrap()
            .env("TRANSLATION_PROVIDER", "no-such-provider")
            .arg("--env-docs")
            .output()
            .unwrap();

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.starts_with("# Environment Variables"));
        for name in [
            "TRANSLATION_PROVIDER",
            "GCP_ACCESS_TOKEN",
            "OPENAI_API_KEY",
            "DUMMY_TRANSLATION_PREFIX",
            "HTML_TRANSLATOR_PORT",
        ] {
            assert!(stdout.contains(name), "{}", name);
        }
    }

    #[test]
    fn print_version() {
        let output = Command::cargo_bin("html-translator-web")
            .unwrap()
            .arg("--version")
            .output()
            .unwrap();

        assert!(output.status.success());
        assert!(String::from_utf8_lossy(&output.stdout).contains(env!("CARGO_PKG_VERSION")));
    }
}

//  ███████╗ █████╗ ██╗██╗     ██╗███╗   ██╗ ██████╗
//  ██╔════╝██╔══██╗██║██║     ██║████╗  ██║██╔════╝
//  █████╗  ███████║██║██║     ██║██╔██╗ ██║██║  ███╗
//  ██╔══╝  ██╔══██║██║██║     ██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║██║███████╗██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚═╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod failing {
    use assert_cmd::Command;

    #[test]
    fn unknown_provider_exits_before_serving() {
        let output = Command::cargo_bin("html-translator-web")
            .unwrap()
            .env("TRANSLATION_PROVIDER", "no-such-provider")
            .args(["--port", "1"])
            .output()
            .unwrap();

        assert!(!output.status.success());
    }

    #[test]
    fn invalid_port_is_rejected() {
        let output = Command::cargo_bin("html-translator-web")
            .unwrap()
            .args(["--port", "not-a-port"])
            .output()
            .unwrap();

        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("--port"));
    }
}
