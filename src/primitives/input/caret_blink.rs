use gpui::Context;
use std::time::Duration;

const BLINK_INTERVAL: Duration = Duration::from_millis(530);

/// Blinks the caret while a field is focused. Each start/reset bumps an
/// epoch so stale timers from earlier schedules fall through silently.
pub struct CaretBlink {
    visible: bool,
    epoch: usize,
}

impl CaretBlink {
    pub fn new() -> Self {
        Self {
            visible: true,
            epoch: 0,
        }
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Call when the caret moves or text is edited so the caret is solid
    /// right after the change.
    pub fn reset(&mut self, cx: &mut Context<Self>) {
        self.visible = true;
        self.epoch = self.epoch.wrapping_add(1);
        self.schedule_blink(self.epoch, cx);
    }

    pub fn start(&mut self, cx: &mut Context<Self>) {
        self.visible = true;
        self.epoch = self.epoch.wrapping_add(1);
        self.schedule_blink(self.epoch, cx);
    }

    pub fn stop(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.visible = true;
    }

    fn schedule_blink(&mut self, epoch: usize, cx: &mut Context<Self>) {
        cx.spawn(async move |this, cx| {
            cx.background_executor().timer(BLINK_INTERVAL).await;
            if let Some(this) = this.upgrade() {
                this.update(cx, |blink, cx| {
                    blink.blink(epoch, cx);
                });
            }
        })
        .detach();
    }

    fn blink(&mut self, epoch: usize, cx: &mut Context<Self>) {
        if epoch != self.epoch {
            return;
        }
        self.visible = !self.visible;
        cx.notify();
        self.schedule_blink(epoch, cx);
    }
}
