//! Run-time configuration for the window, camera and lighting.

/// Directional light with a flat ambient term
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LightConfig {
    /// Direction towards the light, need not be normalised
    pub direction: [f32; 3],
    pub ambient: f32,
    pub diffuse: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            direction: [-5.0, 5.0, 10.0],
            ambient: 0.5,
            diffuse: 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub clear_color: [f64; 4],
    /// Near clip plane of the perspective frustum
    pub near: f32,
    pub far: f32,
    /// World units the view pans per unit of player movement
    pub pan_scale: f32,
    pub light: LightConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "lathekit".to_string(),
            width: 800,
            height: 600,
            clear_color: [0.5, 0.5, 0.5, 1.0],
            near: 1.0,
            far: 100.0,
            pan_scale: 0.05,
            light: LightConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_clear_color(mut self, clear_color: [f64; 4]) -> Self {
        self.clear_color = clear_color;
        self
    }

    pub fn with_clip_planes(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    pub fn with_pan_scale(mut self, pan_scale: f32) -> Self {
        self.pan_scale = pan_scale;
        self
    }

    pub fn with_light(mut self, light: LightConfig) -> Self {
        self.light = light;
        self
    }
}
