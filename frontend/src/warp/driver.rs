use std::rc::{Rc, Weak};

use web_sys::HtmlElement;
use yew::NodeRef;

use super::sequencer::{Motion, TransitionFrame, TransitionSequencer};
use crate::utils::frame_loop::FrameLoop;

impl Motion {
    /// Animation needs a window and a user who has not asked for reduced motion.
    pub fn detect() -> Motion {
        let Some(window) = web_sys::window() else {
            return Motion::Unavailable;
        };
        let reduced = window
            .match_media("(prefers-reduced-motion: reduce)")
            .ok()
            .flatten()
            .map(|query| query.matches())
            .unwrap_or(false);
        if reduced {
            log::info!("reduced motion requested, warp transitions disabled");
            Motion::Unavailable
        } else {
            Motion::Available
        }
    }
}

/// Feeds animation frames to the sequencer and paints its output onto the
/// overlay and the main content element.
pub fn attach(sequencer: &Rc<TransitionSequencer>, overlay: NodeRef, content: NodeRef) {
    let weak: Weak<TransitionSequencer> = Rc::downgrade(sequencer);
    let frames = FrameLoop::new(move |now| {
        let Some(sequencer) = weak.upgrade() else {
            return false;
        };
        let frame = sequencer.tick(now);
        paint(&overlay, &content, &frame);
        !sequencer.is_idle()
    });
    sequencer.set_waker(move || frames.start());
}

fn paint(overlay: &NodeRef, content: &NodeRef, frame: &TransitionFrame) {
    if let Some(overlay) = overlay.cast::<HtmlElement>() {
        let style = overlay.style();
        let _ = style.set_property("opacity", &format!("{:.3}", frame.overlay_opacity));
        let visibility = if frame.overlay_opacity > 0.0 { "visible" } else { "hidden" };
        let _ = style.set_property("visibility", visibility);
    }
    if let Some(content) = content.cast::<HtmlElement>() {
        let style = content.style();
        if *frame == TransitionFrame::REST {
            let _ = style.remove_property("transform");
            let _ = style.remove_property("opacity");
        } else {
            let _ = style.set_property("transform", &format!("scale({:.4})", frame.content_scale));
            let _ = style.set_property("opacity", &format!("{:.3}", frame.content_opacity));
        }
    }
}
