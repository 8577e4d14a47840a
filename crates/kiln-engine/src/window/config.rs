use winit::dpi::PhysicalSize;
use winit::window::{Window, WindowAttributes};

use crate::device::SurfaceRequest;
use crate::render::Color;
use crate::time::DEFAULT_FPS;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,

    /// Drawable size and context capabilities.
    pub surface: SurfaceRequest,

    pub target_fps: u32,
    pub clear_color: Color,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "Mini".to_string(),
            surface: SurfaceRequest::default(),
            target_fps: DEFAULT_FPS,
            clear_color: Color::BLACK,
        }
    }
}

impl RuntimeConfig {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub(crate) fn window_attributes(&self) -> WindowAttributes {
        Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(PhysicalSize::new(self.surface.width, self.surface.height))
            .with_visible(true)
    }
}
