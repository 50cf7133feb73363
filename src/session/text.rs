const VERSION: &str = env!("CARGO_PKG_VERSION");

pub(crate) const PROMPT: &str = "naturecode:~$ ";

pub(crate) fn welcome_banner() -> String {
    format!(
        "\
========================================
NatureCode Terminal v{}
========================================

Welcome to NatureCode AI Terminal!

Available commands:
• help           - Show help information
• naturecode     - Start NatureCode AI assistant
• ls             - List files
• cd <dir>       - Change directory
• pwd            - Print working directory
• clear          - Clear terminal

Type 'naturecode start' to begin AI session.

========================================",
        VERSION
    )
}

pub(crate) fn help_text() -> &'static str {
    "\
Terminal Help:

Basic Commands:
• help           - Show this help
• clear          - Clear terminal screen
• ls [path]      - List files and directories
• cd <dir>       - Change directory
• pwd            - Print working directory

NatureCode Commands:
• naturecode     - NatureCode AI assistant
• naturecode start - Start AI session

File Operations:
• cat <file>     - View file content
• echo <text>    - Print text

Note: Some Linux commands may not be available."
}

pub(crate) fn assistant_help() -> String {
    format!(
        "\
NatureCode AI Assistant v{}

Available commands:
• naturecode start      - Start interactive AI session
• naturecode model      - Configure AI model and API
• naturecode code       - Code analysis tools
• naturecode project    - Project management tools
• naturecode git        - Git operations
• naturecode plugin     - Plugin management
• naturecode --help     - Show this help
• naturecode --version  - Show version

For detailed help on specific commands, run:
naturecode <command> --help",
        VERSION
    )
}

pub(crate) fn assistant_start() -> &'static str {
    "\
Starting NatureCode AI assistant...
Note: Full AI features require network connection.
To configure AI model, run: naturecode model

[AI Session Started]
Type your questions or commands. Type 'exit' to end session.
========================================"
}

pub(crate) fn assistant_version() -> String {
    format!("NatureCode v{}", VERSION)
}

pub(crate) fn script_unavailable() -> &'static str {
    "\
Node.js script execution not available in this version.
Please use the web version at: https://naturecode.ai"
}

pub(crate) fn assistant_unknown() -> &'static str {
    "Unknown NatureCode command. Type 'naturecode --help' for usage."
}
