//! Saving: the document itself (ctrl-s) and the other image format
//! (ctrl-space).

use super::*;

impl App {
    /// Writes the document. Text is trimmed of trailing whitespace first, so
    /// the cursor is pulled back inside its line afterwards.
    pub(super) fn save(&mut self) {
        match self.write(false) {
            Ok(path) => {
                if !self.editor.draw_mode() {
                    self.editor.trim_trailing_whitespace();
                }
                self.save_location();
                self.set_status(&format!("Saved {}", path.display()));
            }
            Err(err) => self.set_error(&err),
        }
    }

    /// For icons, writes the other image format next to the file. For
    /// anything else shows the word count and the time of day.
    pub(super) fn export_or_count(&mut self) {
        if !codec::is_image_path(&self.file_path) {
            let words = self.editor.doc().word_count();
            let now = chrono::Local::now();
            self.set_status(&word_count_message(words, &now));
            return;
        }
        match self.write(true) {
            Ok(path) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                self.set_status(&format!("Saved {}", name));
            }
            Err(err) => self.set_error(&err),
        }
    }

    fn write(&self, alternate: bool) -> Result<PathBuf> {
        if self.read_only && !alternate {
            return Err(Error::ReadOnly(self.file_path.clone()));
        }
        let trim = !self.editor.draw_mode();
        codec::save(self.editor.doc(), &self.file_path, trim, alternate)
    }
}

/// `"<n> words, HH:MM"`
fn word_count_message<Tz: chrono::TimeZone>(words: usize, now: &chrono::DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{} words, {}", words, now.format("%H:%M"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn word_count_carries_the_time() {
        let at = chrono::Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 59).unwrap();
        assert_eq!(word_count_message(12, &at), "12 words, 07:05");
    }
}
