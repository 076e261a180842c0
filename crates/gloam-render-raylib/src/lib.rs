//! Raylib presenter for the darkness layer: texture upload and drawing.
// Unsafe is required for in-place Raylib texture updates in this crate.

use gloam_layer::{DarknessLayer, RgbaSurface};
use raylib::prelude::*;

/// What `DarknessTexture::sync` has to do for a layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Upload {
    /// Surface is empty or unchanged since the last upload.
    Skip,
    /// Size changed (or no texture yet); recreate, then upload.
    Create,
    /// Same size, new pixels.
    Update,
}

/// Decide the upload for a surface given the texture's size and the surface
/// revision it was last filled from.
pub fn plan_upload(
    current: Option<(i32, i32)>,
    uploaded: Option<u64>,
    surface: &RgbaSurface,
    revision: u64,
) -> Upload {
    let size = (surface.width as i32, surface.height as i32);
    if size.0 == 0 || size.1 == 0 {
        return Upload::Skip;
    }
    if current != Some(size) {
        return Upload::Create;
    }
    if uploaded == Some(revision) {
        Upload::Skip
    } else {
        Upload::Update
    }
}

struct LayerTex {
    tex: Texture2D,
    width: i32,
    height: i32,
}

/// GPU copy of a [`DarknessLayer`]'s composited surface.
#[derive(Default)]
pub struct DarknessTexture {
    tex: Option<LayerTex>,
    uploaded: Option<u64>,
}

impl DarknessTexture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> Option<(i32, i32)> {
        self.tex.as_ref().map(|lt| (lt.width, lt.height))
    }

    /// Bring the texture up to date with the layer's surface.
    pub fn sync(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread, layer: &DarknessLayer) {
        let surface = layer.surface();
        let revision = layer.surface_revision();
        match plan_upload(self.size(), self.uploaded, surface, revision) {
            Upload::Skip => {}
            Upload::Create => {
                let width = surface.width as i32;
                let height = surface.height as i32;
                let img = Image::gen_image_color(width, height, Color::BLANK);
                match rl.load_texture_from_image(thread, &img) {
                    Ok(tex) => {
                        tex.set_texture_filter(thread, raylib::consts::TextureFilter::TEXTURE_FILTER_POINT);
                        tex.set_texture_wrap(thread, raylib::consts::TextureWrap::TEXTURE_WRAP_CLAMP);
                        unsafe {
                            raylib::ffi::UpdateTexture(*tex.as_ref(), surface.data.as_ptr() as *const _);
                        }
                        log::debug!("darkness texture {}x{}", width, height);
                        self.tex = Some(LayerTex { tex, width, height });
                        self.uploaded = Some(revision);
                    }
                    Err(e) => log::error!("darkness texture {}x{} failed: {}", width, height, e),
                }
            }
            Upload::Update => {
                if let Some(ref lt) = self.tex {
                    unsafe {
                        raylib::ffi::UpdateTexture(*lt.tex.as_ref(), surface.data.as_ptr() as *const _);
                    }
                    self.uploaded = Some(revision);
                }
            }
        }
    }

    /// Draw at `origin` (screen position of buffer cell `(0, 0)`), one texel
    /// per pixel.
    pub fn draw<D: RaylibDraw>(&self, d: &mut D, origin: (f32, f32)) {
        let Some(ref lt) = self.tex else {
            return;
        };
        let (w, h) = (lt.width as f32, lt.height as f32);
        d.draw_texture_pro(
            &lt.tex,
            Rectangle::new(0.0, 0.0, w, h),
            Rectangle::new(origin.0, origin.1, w, h),
            Vector2::new(0.0, 0.0),
            0.0,
            Color::WHITE,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_surface_skips() {
        let s = RgbaSurface::new(0, 0);
        assert_eq!(plan_upload(None, None, &s, 1), Upload::Skip);
    }

    #[test]
    fn size_change_recreates() {
        let s = RgbaSurface::new(32, 16);
        assert_eq!(plan_upload(None, None, &s, 1), Upload::Create);
        assert_eq!(plan_upload(Some((16, 16)), Some(1), &s, 1), Upload::Create);
    }

    #[test]
    fn revision_gates_update() {
        let s = RgbaSurface::new(32, 16);
        assert_eq!(plan_upload(Some((32, 16)), Some(3), &s, 3), Upload::Skip);
        assert_eq!(plan_upload(Some((32, 16)), Some(3), &s, 4), Upload::Update);
    }
}
