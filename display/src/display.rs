use sdl2::pixels::PixelFormatEnum;
use thiserror::Error;

use chipvm_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use chipvm_core::FrameBuffer;

/// Bytes per pixel in an RGB24 texture
const RGB: usize = 3;

#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("unable to open a window: {0}")]
    Window(String),

    #[error("unable to render a frame: {0}")]
    Render(String),
}

/// # Display
/// The display is composed of 64x32 black/white pixels.
/// The on/off state of these pixels arrives packed 8 to a byte, most significant bit first.
/// The display only gets a call to `render` when the Machine's FrameBuffer is updated.
pub struct Display {
    canvas: sdl2::render::WindowCanvas,
}

impl Display {
    /// Creates a new display object bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `scale` the size multiplier for each pixel
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> Result<Self, DisplayError> {
        let video_subsystem = sdl.video().map_err(DisplayError::Window)?;
        let window = video_subsystem
            .window(
                "chipvm",
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .opengl()
            .build()
            .map_err(|e| DisplayError::Window(e.to_string()))?;
        let canvas = window
            .into_canvas()
            .build()
            .map_err(|e| DisplayError::Window(e.to_string()))?;

        log::debug!("opened {}x{} window", DISPLAY_WIDTH, DISPLAY_HEIGHT);
        Ok(Display { canvas })
    }

    /// Formats a FrameBuffer for rendering as an SDL2 texture.
    ///
    /// An SDL2 texture is a 1D array of bytes that represent concatenated rows of RGB pixels.
    ///
    /// This creates a black and white rendering by:
    /// - Unpacking every bit of every row, most significant bit first
    /// - Triplicating each pixel to represent its RGB values
    /// - Mapping lit pixels to 255 and unlit ones to 0
    ///
    /// # Arguments
    /// * `frame` the Machine's FrameBuffer
    fn frame_to_sdl_texture(frame: &FrameBuffer) -> Vec<u8> {
        frame
            .rows()
            .iter()
            .flat_map(|row| row.iter())
            .flat_map(|byte| (0..8).map(move |bit| (byte >> (7 - bit)) & 1))
            .flat_map(|pixel| std::iter::repeat(pixel * 255).take(RGB))
            .collect()
    }

    /// Formats the FrameBuffer as an SDL2 RGB24 texture and renders it.
    ///
    /// # Arguments
    /// * `frame` the Machine's FrameBuffer
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<(), DisplayError> {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                DISPLAY_WIDTH as u32,
                DISPLAY_HEIGHT as u32,
            )
            .map_err(|e| DisplayError::Render(e.to_string()))?;

        let pixels = Display::frame_to_sdl_texture(frame);
        texture
            .with_lock(None, |buffer: &mut [u8], pitch: usize| {
                // Rows may be padded out beyond DISPLAY_WIDTH * RGB bytes
                for (y, row) in pixels.chunks(DISPLAY_WIDTH * RGB).enumerate() {
                    buffer[y * pitch..y * pitch + row.len()].copy_from_slice(row);
                }
            })
            .map_err(DisplayError::Render)?;

        self.canvas
            .copy(&texture, None, None)
            .map_err(DisplayError::Render)?;
        self.canvas.present();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_to_sdl_texture() {
        let mut frame = FrameBuffer::new();
        // (1, 0) and (0, 1)
        frame.draw_sprite(0, 0, &[0b0100_0000, 0b1000_0000]);
        let frame = Display::frame_to_sdl_texture(&frame);

        let mut expected: Vec<u8> = vec![0; 6144];
        expected[0..6].copy_from_slice(&[0, 0, 0, 255, 255, 255]);
        expected[192..198].copy_from_slice(&[255, 255, 255, 0, 0, 0]);

        assert_eq!(frame, expected);
    }

    #[test]
    fn test_blank_frame_is_black() {
        let frame = Display::frame_to_sdl_texture(&FrameBuffer::new());
        assert_eq!(frame.len(), DISPLAY_WIDTH * DISPLAY_HEIGHT * RGB);
        assert!(frame.iter().all(|byte| *byte == 0));
    }
}
