use std::fmt;
use std::sync::Arc;

/// Failure to bring up a GPU device.
#[derive(Debug)]
pub enum GraphicsError {
    /// No adapter matched the requested options
    NoAdapter(String),
    /// The adapter refused to create a device
    DeviceCreation(String),
}

impl fmt::Display for GraphicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoAdapter(msg) => write!(f, "No suitable GPU adapter: {}", msg),
            Self::DeviceCreation(msg) => write!(f, "Failed to create GPU device: {}", msg),
        }
    }
}

impl std::error::Error for GraphicsError {}

/// Options for [`GraphicsContext`] creation.
#[derive(Debug, Clone)]
pub struct GraphicsContextDescriptor {
    pub backends: wgpu::Backends,
    pub power_preference: wgpu::PowerPreference,
    pub force_fallback_adapter: bool,
    pub limits: wgpu::Limits,
    pub label: Option<&'static str>,
}

impl Default for GraphicsContextDescriptor {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
            power_preference: wgpu::PowerPreference::default(),
            force_fallback_adapter: false,
            limits: wgpu::Limits::downlevel_defaults(),
            label: Some("trip_atlas_device"),
        }
    }
}

/// A shared GPU device and queue.
///
/// ```rust,no_run
/// use trip_atlas_render::GraphicsContext;
///
/// let ctx = GraphicsContext::new_owned_sync().unwrap();
/// let ctx2 = ctx.clone(); // Cheap clone (Arc)
/// ```
pub struct GraphicsContext {
    pub instance: wgpu::Instance,
    pub adapter: wgpu::Adapter,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

impl GraphicsContext {
    pub async fn new_owned() -> Result<Arc<Self>, GraphicsError> {
        Self::new_owned_with_descriptor(GraphicsContextDescriptor::default()).await
    }

    /// Blocks the current thread until the context is created.
    pub fn new_owned_sync() -> Result<Arc<Self>, GraphicsError> {
        pollster::block_on(Self::new_owned())
    }

    pub fn new_owned_with_descriptor_sync(
        descriptor: GraphicsContextDescriptor,
    ) -> Result<Arc<Self>, GraphicsError> {
        pollster::block_on(Self::new_owned_with_descriptor(descriptor))
    }

    pub async fn new_owned_with_descriptor(
        descriptor: GraphicsContextDescriptor,
    ) -> Result<Arc<Self>, GraphicsError> {
        let context = Self::create_context_internal(descriptor).await?;
        Ok(Arc::new(context))
    }

    async fn create_context_internal(
        descriptor: GraphicsContextDescriptor,
    ) -> Result<Self, GraphicsError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: descriptor.backends,
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: descriptor.power_preference,
                compatible_surface: None,
                force_fallback_adapter: descriptor.force_fallback_adapter,
            })
            .await
            .map_err(|e| GraphicsError::NoAdapter(e.to_string()))?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: descriptor.label,
                required_limits: descriptor.limits.using_resolution(adapter.limits()),
                ..Default::default()
            })
            .await
            .map_err(|e| GraphicsError::DeviceCreation(e.to_string()))?;

        let info = adapter.get_info();
        tracing::info!("Created graphics context on {} ({:?})", info.name, info.backend);

        Ok(Self {
            instance,
            adapter,
            device,
            queue,
        })
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn info(&self) -> wgpu::AdapterInfo {
        self.adapter.get_info()
    }

    pub fn limits(&self) -> wgpu::Limits {
        self.device.limits()
    }

    #[inline]
    pub fn max_texture_dimension_2d(&self) -> u32 {
        self.device.limits().max_texture_dimension_2d
    }
}
