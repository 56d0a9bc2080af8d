//! Startup banner. Colored wordmark plus version line.

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use std::io::{Write, stdout};

const ACCENT: (u8, u8, u8) = (0x0f, 0xf0, 0xfc);

/// Prints the welcome banner: the wordmark, version, and a hint about
/// the registry file in use.
pub fn print_welcome(data_path: &str) {
    let mut out = stdout();
    let _ = out.execute(SetForegroundColor(Color::Rgb {
        r: ACCENT.0,
        g: ACCENT.1,
        b: ACCENT.2,
    }));
    let _ = out.execute(Print("SALESDESK\r\n"));
    let _ = out.execute(Print(format!("v{}\r\n", env!("CARGO_PKG_VERSION"))));
    let _ = out.execute(ResetColor);
    let _ = out.execute(Print(format!("registry: {data_path}\r\n\r\n")));
    let _ = out.flush();
}
