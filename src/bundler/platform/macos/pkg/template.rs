//! Default template bodies for the installer package.
//!
//! Every template takes a single `app_name` parameter.

/// Runs before files are copied: stops a previously installed agent.
pub const PREINSTALL: &str = r#"#!/bin/sh
AGENT="/Library/LaunchAgents/com.koding.kite.{{app_name}}.plist"
CONSOLE_USER=$(stat -f "%Su" /dev/console)

if [ -f "$AGENT" ] && [ -n "$CONSOLE_USER" ] && [ "$CONSOLE_USER" != "root" ]; then
    sudo -u "$CONSOLE_USER" launchctl unload "$AGENT" 2>/dev/null || true
fi

exit 0
"#;

/// Runs after files are copied: fixes ownership and starts the agent.
pub const POSTINSTALL: &str = r#"#!/bin/sh
BINARY="/usr/local/bin/{{app_name}}"
AGENT="/Library/LaunchAgents/com.koding.kite.{{app_name}}.plist"
CONSOLE_USER=$(stat -f "%Su" /dev/console)

chmod 755 "$BINARY"

if [ -f "$AGENT" ]; then
    chown root:wheel "$AGENT"
    chmod 644 "$AGENT"
    if [ -n "$CONSOLE_USER" ] && [ "$CONSOLE_USER" != "root" ]; then
        sudo -u "$CONSOLE_USER" launchctl load -w "$AGENT"
    fi
fi

exit 0
"#;

/// launchd agent that keeps the installed binary running.
pub const LAUNCH_AGENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>Label</key>
    <string>com.koding.kite.{{app_name}}</string>
    <key>ProgramArguments</key>
    <array>
        <string>/usr/local/bin/{{app_name}}</string>
    </array>
    <key>RunAtLoad</key>
    <true/>
    <key>KeepAlive</key>
    <true/>
    <key>StandardOutPath</key>
    <string>/tmp/{{app_name}}.log</string>
    <key>StandardErrorPath</key>
    <string>/tmp/{{app_name}}.log</string>
</dict>
</plist>
"#;

/// productbuild distribution descriptor wrapping the single component package.
pub const DISTRIBUTION: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<installer-gui-script minSpecVersion="1">
    <title>Koding {{app_name}}</title>
    <options customize="never" require-scripts="false"/>
    <domains enable_anywhere="false" enable_currentUserHome="false" enable_localSystem="true"/>
    <choices-outline>
        <line choice="default">
            <line choice="com.koding.kite.{{app_name}}.pkg"/>
        </line>
    </choices-outline>
    <choice id="default"/>
    <choice id="com.koding.kite.{{app_name}}.pkg" visible="false">
        <pkg-ref id="com.koding.kite.{{app_name}}.pkg"/>
    </choice>
    <pkg-ref id="com.koding.kite.{{app_name}}.pkg" onConclusion="none">com.koding.kite.{{app_name}}.pkg</pkg-ref>
</installer-gui-script>
"#;
