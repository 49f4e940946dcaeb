//! Modal warning/error dialogs.
//!
//! One dialog at most is shown at a time; while it is open the rest of
//! the UI is disabled. Dismissing it ends the current action — errors
//! are never fatal to the process.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub kind: DialogKind,
    pub message: String,
}

impl Dialog {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Error,
            message: message.into(),
        }
    }

    fn title(&self) -> &'static str {
        match self.kind {
            DialogKind::Warning => "Warning",
            DialogKind::Error => "Error",
        }
    }

    /// Render the dialog. Returns true once the user dismissed it.
    pub fn show(&self, ctx: &egui::Context) -> bool {
        let mut dismissed = false;
        egui::Window::new(self.title())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(&self.message);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            });
        dismissed
    }
}
