use client_core::{Notification, NotificationLevel};
use eframe::egui;

const TOAST_SECONDS: f64 = 4.0;

struct Toast {
    notification: Notification,
    shown_at: Option<f64>,
}

/// Notifications waiting to be shown, oldest first.
#[derive(Default)]
pub struct Toasts {
    queue: Vec<Toast>,
}

impl Toasts {
    pub fn push(&mut self, notification: Notification) {
        self.queue.push(Toast {
            notification,
            shown_at: None,
        });
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[cfg(test)]
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.queue
            .iter()
            .map(|toast| toast.notification.message.as_str())
    }

    /// Drops toasts shown for longer than their lifetime. Toasts not yet
    /// rendered start their clock at `now`.
    pub fn expire(&mut self, now: f64) {
        for toast in &mut self.queue {
            toast.shown_at.get_or_insert(now);
        }
        self.queue
            .retain(|toast| toast.shown_at.is_some_and(|at| now - at < TOAST_SECONDS));
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        let now = ctx.input(|i| i.time);
        self.expire(now);
        if self.queue.is_empty() {
            return;
        }

        egui::Area::new(egui::Id::new("toasts"))
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -16.0))
            .show(ctx, |ui| {
                for toast in &self.queue {
                    let (fill, text) = match toast.notification.level {
                        NotificationLevel::Success => (
                            egui::Color32::from_rgb(35, 110, 60),
                            egui::Color32::WHITE,
                        ),
                        NotificationLevel::Error => (
                            egui::Color32::from_rgb(150, 40, 40),
                            egui::Color32::WHITE,
                        ),
                    };
                    egui::Frame::NONE
                        .fill(fill)
                        .corner_radius(8.0)
                        .inner_margin(egui::Margin::symmetric(10, 8))
                        .show(ui, |ui| {
                            ui.colored_label(text, &toast.notification.message);
                        });
                    ui.add_space(6.0);
                }
            });
        ctx.request_repaint_after(std::time::Duration::from_millis(250));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_expire_after_their_lifetime() {
        let mut toasts = Toasts::default();
        toasts.push(Notification::success("Album added successfully."));
        toasts.expire(10.0);
        assert_eq!(toasts.len(), 1);

        toasts.push(Notification::error("Failed to add image."));
        toasts.expire(12.0);
        assert_eq!(toasts.len(), 2);

        toasts.expire(14.5);
        assert_eq!(
            toasts.messages().collect::<Vec<_>>(),
            vec!["Failed to add image."]
        );

        toasts.expire(16.5);
        assert_eq!(toasts.len(), 0);
    }
}
