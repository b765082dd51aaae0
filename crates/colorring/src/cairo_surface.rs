use crate::config::ImageRef;
use crate::geometry::{Point, Rect};
use crate::render::Surface;
use cairo::Context;
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use palette::Srgba;
use std::collections::HashMap;
use std::f64::consts::PI;

/// Decoded images kept across frames. A path that fails to load is
/// remembered as missing so the failure is only logged once.
#[derive(Default)]
pub struct ImageCache {
    images: HashMap<ImageRef, Option<Pixbuf>>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, image: &ImageRef) -> Option<&Pixbuf> {
        self.images
            .entry(image.clone())
            .or_insert_with(|| match Pixbuf::from_file(image.as_path()) {
                Ok(pixbuf) => Some(pixbuf),
                Err(e) => {
                    log::warn!("Failed to load image '{}': {}", image, e);
                    None
                }
            })
            .as_ref()
    }

    /// Forgets everything, e.g. after the configured images changed on disk.
    pub fn clear(&mut self) {
        self.images.clear();
    }
}

pub struct CairoSurface<'a> {
    cr: &'a Context,
    images: &'a mut ImageCache,
}

impl<'a> CairoSurface<'a> {
    pub fn new(cr: &'a Context, images: &'a mut ImageCache) -> Self {
        Self { cr, images }
    }

    fn set_source(&self, color: Srgba<f64>) {
        let (r, g, b, a) = color.into_components();
        self.cr.set_source_rgba(r, g, b, a);
    }

    fn circle(&self, center: Point, radius: f64) {
        self.cr.new_path();
        self.cr.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
    }
}

impl Surface for CairoSurface<'_> {
    type Error = cairo::Error;

    fn fill_wedge(
        &mut self,
        center: Point,
        radius: f64,
        start: f64,
        sweep: f64,
        color: Srgba<f64>,
    ) -> Result<(), cairo::Error> {
        self.set_source(color);
        self.cr.new_path();
        self.cr.move_to(center.x, center.y);
        self.cr.arc(
            center.x,
            center.y,
            radius,
            start.to_radians(),
            (start + sweep).to_radians(),
        );
        self.cr.close_path();
        self.cr.fill()
    }

    fn clear_disc(&mut self, center: Point, radius: f64) -> Result<(), cairo::Error> {
        self.cr.save()?;
        self.cr.set_operator(cairo::Operator::Clear);
        self.circle(center, radius);
        self.cr.fill()?;
        self.cr.restore()
    }

    fn fill_circle(
        &mut self,
        center: Point,
        radius: f64,
        color: Srgba<f64>,
    ) -> Result<(), cairo::Error> {
        self.set_source(color);
        self.circle(center, radius);
        self.cr.fill()
    }

    fn stroke_circle(
        &mut self,
        center: Point,
        radius: f64,
        width: f64,
        color: Srgba<f64>,
    ) -> Result<(), cairo::Error> {
        self.set_source(color);
        self.cr.set_line_width(width);
        self.circle(center, radius);
        self.cr.stroke()
    }

    fn draw_text(
        &mut self,
        center: Point,
        size: f64,
        text: &str,
        color: Srgba<f64>,
    ) -> Result<(), cairo::Error> {
        self.set_source(color);
        self.cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        self.cr.set_font_size(size);
        let ext = self.cr.text_extents(text)?;
        self.cr.move_to(
            center.x - ext.width() / 2.0 - ext.x_bearing(),
            center.y - ext.height() / 2.0 - ext.y_bearing(),
        );
        self.cr.show_text(text)
    }

    fn draw_image(&mut self, image: &ImageRef, bounds: Rect) -> Result<(), cairo::Error> {
        let Some(pixbuf) = self.images.get(image) else {
            return Ok(());
        };
        let (width, height) = (pixbuf.width() as f64, pixbuf.height() as f64);
        if width <= 0.0 || height <= 0.0 || bounds.width <= 0.0 || bounds.height <= 0.0 {
            return Ok(());
        }

        self.cr.save()?;
        self.cr.translate(bounds.x, bounds.y);
        self.cr.scale(bounds.width / width, bounds.height / height);
        self.cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
        self.cr.paint()?;
        self.cr.restore()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Preset, SelectorConfig};
    use crate::selector::ColorWheelSelector;
    use crate::swatch::Swatch;
    use cairo::{Format, ImageSurface};

    /// Renders `selector` into a fresh ARGB32 surface and returns
    /// (stride, pixel bytes).
    fn rasterize(selector: &ColorWheelSelector, size: i32) -> (usize, Vec<u8>) {
        let mut surface = ImageSurface::create(Format::ARgb32, size, size).unwrap();
        {
            let cr = Context::new(&surface).unwrap();
            let mut images = ImageCache::new();
            selector
                .render(&mut CairoSurface::new(&cr, &mut images))
                .unwrap();
        }
        surface.flush();
        let stride = surface.stride() as usize;
        let data = surface.data().unwrap().to_vec();
        (stride, data)
    }

    /// ARGB32 is stored native-endian; on little-endian hosts the byte order
    /// is B, G, R, A.
    fn pixel(data: &[u8], stride: usize, x: usize, y: usize) -> (u8, u8, u8, u8) {
        let offset = y * stride + x * 4;
        let word = u32::from_ne_bytes([
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        ]);
        (
            (word >> 16) as u8,
            (word >> 8) as u8,
            word as u8,
            (word >> 24) as u8,
        )
    }

    #[test]
    fn test_wedges_and_cleared_center() {
        let config = SelectorConfig {
            ring_thickness: 40.0,
            ..Preset::Classic.config()
        };
        let mut selector = ColorWheelSelector::new(config).unwrap();
        selector.on_bounds_changed(200.0, 200.0);
        let (stride, data) = rasterize(&selector, 200);

        // 36 degrees on the mid radius falls inside the first wedge, clear of the thumb
        let p = selector.geometry().point_at(36.0, 80.0);
        assert_eq!(
            pixel(&data, stride, p.x as usize, p.y as usize),
            (255, 0, 0, 255)
        );

        // 100 degrees is in the second wedge
        let p = selector.geometry().point_at(100.0, 80.0);
        assert_eq!(
            pixel(&data, stride, p.x as usize, p.y as usize),
            (0, 255, 0, 255)
        );

        assert_eq!(pixel(&data, stride, 100, 100).3, 0);
        // corners lie outside the ring
        assert_eq!(pixel(&data, stride, 2, 2).3, 0);
    }

    #[test]
    fn test_thumb_is_filled_with_selection() {
        let config = SelectorConfig {
            ring_thickness: 40.0,
            ..Preset::Classic.config()
        };
        let mut selector = ColorWheelSelector::new(config).unwrap();
        selector.on_bounds_changed(200.0, 200.0);
        selector.handle_touch_down(Point::new(100.0, 150.0));
        assert_eq!(selector.selected(), Swatch::GREEN);

        let (stride, data) = rasterize(&selector, 200);
        let thumb = selector.thumb_position();
        assert_eq!(
            pixel(&data, stride, thumb.x.round() as usize, thumb.y.round() as usize),
            (0, 255, 0, 255)
        );
    }

    #[test]
    fn test_missing_image_is_skipped() {
        let mut images = ImageCache::new();
        let missing = ImageRef::new("/nonexistent/colorring/overlay.png");
        assert!(images.get(&missing).is_none());
        assert!(images.get(&missing).is_none());

        let config = SelectorConfig {
            overlay: Some(missing),
            ..Preset::Confirm.config()
        };
        let mut selector = ColorWheelSelector::new(config).unwrap();
        selector.on_bounds_changed(400.0, 400.0);
        let surface = ImageSurface::create(Format::ARgb32, 400, 400).unwrap();
        let cr = Context::new(&surface).unwrap();
        assert!(
            selector
                .render(&mut CairoSurface::new(&cr, &mut images))
                .is_ok()
        );
    }
}
