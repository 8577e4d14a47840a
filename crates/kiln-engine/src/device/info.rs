use std::fmt;

/// Adapter identification reported after setup.
///
/// Purely observational; nothing reads it back.
#[derive(Debug, Clone)]
pub struct AdapterReport {
    pub name: String,
    pub vendor: u32,
    pub device: u32,
    pub device_type: wgpu::DeviceType,
    pub backend: wgpu::Backend,
    pub driver: String,
    pub driver_info: String,
    pub features: wgpu::Features,
}

impl AdapterReport {
    pub fn from_adapter(adapter: &wgpu::Adapter) -> Self {
        let info = adapter.get_info();
        Self {
            name: info.name,
            vendor: info.vendor,
            device: info.device,
            device_type: info.device_type,
            backend: info.backend,
            driver: info.driver,
            driver_info: info.driver_info,
            features: adapter.features(),
        }
    }
}

impl fmt::Display for AdapterReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:?}, {:?}) vendor=0x{:04x} device=0x{:04x} driver={} {}",
            self.name,
            self.device_type,
            self.backend,
            self.vendor,
            self.device,
            self.driver,
            self.driver_info,
        )
    }
}
