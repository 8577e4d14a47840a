use anyhow::Result;
use naga::valid::Capabilities;

/// Feature level requested from the adapter.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum ContextProfile {
    /// Lowest common denominator (WebGL2-class limits, GL backend allowed).
    ///
    /// Picked for broad compatibility; the example programs need nothing more.
    #[default]
    Compatibility,

    /// Default wgpu limits on any primary backend.
    Full,
}

impl ContextProfile {
    pub fn backends(self) -> wgpu::Backends {
        match self {
            ContextProfile::Compatibility => wgpu::Backends::all(),
            ContextProfile::Full => wgpu::Backends::PRIMARY,
        }
    }

    pub fn limits(self) -> wgpu::Limits {
        match self {
            ContextProfile::Compatibility => wgpu::Limits::downlevel_webgl2_defaults(),
            ContextProfile::Full => wgpu::Limits::default(),
        }
    }

    /// Shader capabilities a device of this profile can run.
    ///
    /// WebGL2-class devices get no optional capability at all; device features
    /// add the matching shader capability on top of the profile baseline.
    pub fn shader_capabilities(self, features: wgpu::Features) -> Capabilities {
        let mut caps = match self {
            ContextProfile::Compatibility => Capabilities::empty(),
            ContextProfile::Full => Capabilities::default(),
        };

        let optional = [
            (wgpu::Features::SHADER_F64, Capabilities::FLOAT64),
            (wgpu::Features::SHADER_F16, Capabilities::SHADER_FLOAT16),
            (wgpu::Features::SHADER_INT64, Capabilities::SHADER_INT64),
            (wgpu::Features::SHADER_PRIMITIVE_INDEX, Capabilities::PRIMITIVE_INDEX),
        ];
        for (feature, cap) in optional {
            if features.contains(feature) {
                caps |= cap;
            }
        }
        caps
    }
}

/// Swap interval in vertical blanks.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum SwapInterval {
    /// 0: present as soon as possible; frame pacing is done by the loop.
    #[default]
    Immediate,

    /// 1: present on vertical blank.
    VSync,
}

impl SwapInterval {
    pub fn from_interval(interval: u32) -> Self {
        if interval == 0 {
            SwapInterval::Immediate
        } else {
            SwapInterval::VSync
        }
    }

    /// `Auto*` modes are supported on every surface and fall back internally.
    pub fn present_mode(self) -> wgpu::PresentMode {
        match self {
            SwapInterval::Immediate => wgpu::PresentMode::AutoNoVsync,
            SwapInterval::VSync => wgpu::PresentMode::AutoVsync,
        }
    }
}

/// Capabilities requested when creating a [`Surface`](super::Surface).
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceRequest {
    /// Initial drawable width in logical pixels.
    pub width: u32,

    /// Initial drawable height in logical pixels.
    pub height: u32,

    pub profile: ContextProfile,

    /// Double buffering maps to a frame latency of 2; single buffering to 1.
    pub double_buffered: bool,

    /// Depth buffer precision in bits, `None` for no depth target.
    pub depth_bits: Option<u8>,

    pub swap_interval: SwapInterval,
}

impl Default for SurfaceRequest {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            profile: ContextProfile::Compatibility,
            double_buffered: true,
            depth_bits: Some(24),
            swap_interval: SwapInterval::Immediate,
        }
    }
}

impl SurfaceRequest {
    /// Checks the request before any window or device is created.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.width > 0 && self.height > 0,
            "surface size must be non-zero, got {}x{}",
            self.width,
            self.height
        );
        self.depth_format()?;
        Ok(())
    }

    pub fn frame_latency(&self) -> u32 {
        if self.double_buffered { 2 } else { 1 }
    }

    /// Depth texture format for the requested precision.
    pub fn depth_format(&self) -> Result<Option<wgpu::TextureFormat>> {
        let format = match self.depth_bits {
            None => None,
            Some(16) => Some(wgpu::TextureFormat::Depth16Unorm),
            Some(24) => Some(wgpu::TextureFormat::Depth24Plus),
            Some(32) => Some(wgpu::TextureFormat::Depth32Float),
            Some(bits) => anyhow::bail!("unsupported depth buffer precision: {bits} bits"),
        };
        Ok(format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_request_matches_the_minimal_window() {
        let req = SurfaceRequest::default();
        assert_eq!((req.width, req.height), (640, 480));
        assert_eq!(req.frame_latency(), 2);
        assert_eq!(req.swap_interval.present_mode(), wgpu::PresentMode::AutoNoVsync);
        assert_eq!(req.depth_format().unwrap(), Some(wgpu::TextureFormat::Depth24Plus));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn zero_sized_request_is_rejected() {
        let req = SurfaceRequest {
            width: 0,
            ..SurfaceRequest::default()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn unknown_depth_precision_is_rejected() {
        let req = SurfaceRequest {
            depth_bits: Some(12),
            ..SurfaceRequest::default()
        };
        assert!(req.validate().is_err());

        let req = SurfaceRequest {
            depth_bits: None,
            ..SurfaceRequest::default()
        };
        assert_eq!(req.depth_format().unwrap(), None);
    }

    #[test]
    fn swap_interval_maps_to_present_modes() {
        assert_eq!(SwapInterval::from_interval(0), SwapInterval::Immediate);
        assert_eq!(SwapInterval::from_interval(1), SwapInterval::VSync);
        assert_eq!(SwapInterval::VSync.present_mode(), wgpu::PresentMode::AutoVsync);
    }

    #[test]
    fn compatibility_profile_has_no_optional_shader_capabilities() {
        let caps = ContextProfile::Compatibility.shader_capabilities(wgpu::Features::empty());
        assert!(caps.is_empty());

        let caps = ContextProfile::Compatibility.shader_capabilities(wgpu::Features::SHADER_F64);
        assert_eq!(caps, Capabilities::FLOAT64);
    }

    #[test]
    fn full_profile_keeps_the_naga_baseline() {
        let caps = ContextProfile::Full.shader_capabilities(wgpu::Features::empty());
        assert_eq!(caps, Capabilities::default());
        assert!(!caps.contains(Capabilities::FLOAT64));
    }

    #[test]
    fn single_buffering_lowers_latency() {
        let req = SurfaceRequest {
            double_buffered: false,
            ..SurfaceRequest::default()
        };
        assert_eq!(req.frame_latency(), 1);
    }
}
