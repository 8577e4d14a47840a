use winit::event::WindowEvent;

use crate::runtime::LoopEvent;

/// Maps a winit window event onto the loop's event vocabulary.
pub fn translate_window_event(event: &WindowEvent) -> LoopEvent {
    match event {
        WindowEvent::CloseRequested | WindowEvent::Destroyed => LoopEvent::Quit,
        WindowEvent::Resized(size) => LoopEvent::Resized {
            width: size.width,
            height: size.height,
        },
        WindowEvent::Focused(focused) => LoopEvent::Focused(*focused),
        _ => LoopEvent::Other,
    }
}
