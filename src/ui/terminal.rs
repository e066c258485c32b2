//! ANSI serial terminal rendering.

use core::fmt::{self, Write};

/// Erase the screen and home the cursor.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[1;1H";

/// Menu output on top of any character sink.
pub struct Terminal<W> {
    out: W,
}

impl<W: Write> Terminal<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    pub fn clear_screen(&mut self) -> fmt::Result {
        self.out.write_str(CLEAR_SCREEN)
    }

    /// Draw a full menu screen.
    ///
    /// ```text
    ///  :: Menu ::
    /// A0
    /// > A1: 4711
    /// A2
    /// ```
    pub fn write_list(&mut self, items: &[&str], highlighted: usize, live: Option<i32>) -> fmt::Result {
        self.clear_screen()?;
        self.out.write_str(" :: Menu ::\r\n")?;
        for (line, item) in items.iter().enumerate() {
            match (line == highlighted, live) {
                (true, Some(value)) => write!(self.out, "> {}: {}\r\n", item, value)?,
                (true, None) => write!(self.out, "> {}\r\n", item)?,
                (false, _) => write!(self.out, "{}\r\n", item)?,
            }
        }
        Ok(())
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }
}

impl<W: Write> Write for Terminal<W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.out.write_str(s)
    }
}
