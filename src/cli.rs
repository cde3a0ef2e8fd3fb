// cli.rs - Command-line configuration for the headless driver
use clap::Parser;
use fractal_raster::{
    Complex, DEFAULT_CENTER, DEFAULT_HEIGHT, DEFAULT_MAX_ITERATIONS, DEFAULT_PLANE_MAX,
    DEFAULT_PLANE_MIN, DEFAULT_WIDTH, PixelRect, ScriptInput, Viewport,
};
use std::error::Error;
use std::num::NonZeroUsize;

#[derive(Parser, Debug, Clone)]
#[command(name = "fractal-raster")]
#[command(about = "Renders Mandelbrot frames headlessly from a scripted command sequence", long_about = None)]
pub struct Cli {
    /// Grid width in pixels
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: u32,

    /// Grid height in pixels
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: u32,

    /// Lower bound of the plane range, shared by both axes
    #[arg(long, default_value_t = DEFAULT_PLANE_MIN, allow_negative_numbers = true)]
    pub plane_min: f64,

    /// Upper bound of the plane range, shared by both axes
    #[arg(long, default_value_t = DEFAULT_PLANE_MAX, allow_negative_numbers = true)]
    pub plane_max: f64,

    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    pub max_iterations: u32,

    #[arg(long, default_value_t = DEFAULT_CENTER.real, allow_negative_numbers = true)]
    pub center_x: f64,

    #[arg(long, default_value_t = DEFAULT_CENTER.imag, allow_negative_numbers = true)]
    pub center_y: f64,

    /// Render worker threads; defaults to the available parallelism
    #[arg(long)]
    pub threads: Option<NonZeroUsize>,

    /// Commands applied one per tick, e.g. "zoom-in,left,left,-"
    #[arg(long, default_value = "")]
    pub commands: String,
}

impl Cli {
    pub fn viewport(&self) -> Result<Viewport, Box<dyn Error>> {
        let pixel_rect = PixelRect::new(self.width, self.height)?;
        let viewport = Viewport::new(
            pixel_rect,
            self.plane_min,
            self.plane_max,
            self.max_iterations,
            Complex::new(self.center_x, self.center_y),
        )?;

        Ok(viewport)
    }

    pub fn script(&self) -> Result<ScriptInput, Box<dyn Error>> {
        Ok(ScriptInput::parse(&self.commands)?)
    }
}
