use crate::config::{ButtonConfig, ImageRef, ThumbConfig};
use crate::geometry::{FULL_TURN, Geometry, Point, Rect};
use crate::selector::ColorWheelSelector;
use palette::Srgba;

/// Drawing capabilities the host supplies. Angles are in degrees and run
/// clockwise in screen space, starting at 3 o'clock.
pub trait Surface {
    type Error;

    /// Pie slice from the center out to `radius`.
    fn fill_wedge(
        &mut self,
        center: Point,
        radius: f64,
        start: f64,
        sweep: f64,
        color: Srgba<f64>,
    ) -> Result<(), Self::Error>;

    /// Resets the disc to fully transparent.
    fn clear_disc(&mut self, center: Point, radius: f64) -> Result<(), Self::Error>;

    fn fill_circle(
        &mut self,
        center: Point,
        radius: f64,
        color: Srgba<f64>,
    ) -> Result<(), Self::Error>;

    fn stroke_circle(
        &mut self,
        center: Point,
        radius: f64,
        width: f64,
        color: Srgba<f64>,
    ) -> Result<(), Self::Error>;

    /// Text centered on `center`.
    fn draw_text(
        &mut self,
        center: Point,
        size: f64,
        text: &str,
        color: Srgba<f64>,
    ) -> Result<(), Self::Error>;

    /// Image scaled to fill `bounds`. Surfaces that cannot load the image
    /// skip it.
    fn draw_image(&mut self, image: &ImageRef, bounds: Rect) -> Result<(), Self::Error>;
}

struct RingRenderer<'a> {
    selector: &'a ColorWheelSelector,
    geometry: &'a Geometry,
}

impl<'a> RingRenderer<'a> {
    fn new(selector: &'a ColorWheelSelector) -> Self {
        Self {
            selector,
            geometry: selector.geometry(),
        }
    }

    fn draw<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        self.draw_wedges(surface)?;
        self.draw_inner_disc(surface)?;
        self.draw_overlay(surface)?;
        self.draw_thumb(surface, &self.selector.config().thumb)?;
        self.draw_inner_fill(surface)?;
        if let Some(button) = &self.selector.config().button {
            self.draw_button(surface, button)?;
        }
        Ok(())
    }

    fn draw_wedges<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        let palette = self.selector.palette();
        let sweep = palette.sweep();
        let offset = self.selector.config().rotation_offset;

        for (i, swatch) in palette.iter().enumerate() {
            let start = (i as f64 * sweep + offset).rem_euclid(FULL_TURN);
            surface.fill_wedge(
                self.geometry.center,
                self.geometry.outer_radius,
                start,
                sweep,
                swatch.to_srgba(),
            )?;
        }
        Ok(())
    }

    fn draw_inner_disc<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        let (center, radius) = (self.geometry.center, self.geometry.inner_radius);
        if radius <= 0.0 {
            return Ok(());
        }
        surface.clear_disc(center, radius)
    }

    /// Opaque center painted over the overlay and thumb.
    fn draw_inner_fill<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        let (center, radius) = (self.geometry.center, self.geometry.inner_radius);
        match self.selector.config().inner_fill {
            Some(fill) if radius > 0.0 => surface.fill_circle(center, radius, fill.to_srgba()),
            _ => Ok(()),
        }
    }

    fn draw_overlay<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        let config = self.selector.config();
        match &config.overlay {
            Some(image) => {
                let padding = config.overlay_padding * self.geometry.scale_factor;
                let bounds =
                    Rect::centered(self.geometry.center, self.geometry.outer_radius + padding);
                surface.draw_image(image, bounds)
            }
            None => Ok(()),
        }
    }

    fn draw_thumb<S: Surface>(&self, surface: &mut S, thumb: &ThumbConfig) -> Result<(), S::Error> {
        let position = self.selector.thumb_position();
        let scale = self.geometry.scale_factor;

        if let Some(image) = &thumb.image {
            let half = thumb.image_size * scale / 2.0;
            return surface.draw_image(image, Rect::centered(position, half));
        }

        let radius = self.geometry.thumb_radius;
        surface.stroke_circle(
            position,
            radius,
            thumb.stroke_width * scale,
            thumb.stroke.to_srgba(),
        )?;
        let fill_radius = radius - thumb.fill_inset * scale;
        if fill_radius > 0.0 {
            surface.fill_circle(position, fill_radius, self.selector.selected().to_srgba())?;
        }
        Ok(())
    }

    fn draw_button<S: Surface>(
        &self,
        surface: &mut S,
        button: &ButtonConfig,
    ) -> Result<(), S::Error> {
        let scale = self.geometry.scale_factor;
        let center = self.geometry.center;
        surface.fill_circle(center, button.radius * scale, button.fill.to_srgba())?;
        if !button.label.is_empty() {
            surface.draw_text(
                center,
                button.text_size * scale,
                &button.label,
                button.label_color.to_srgba(),
            )?;
        }
        Ok(())
    }
}

/// Paints the ring: wedges, cleared center, overlay image, thumb, center fill,
/// then the confirm button. A zero-sized ring paints nothing.
pub fn draw<S: Surface>(surface: &mut S, selector: &ColorWheelSelector) -> Result<(), S::Error> {
    if selector.geometry().is_empty() {
        return Ok(());
    }
    RingRenderer::new(selector).draw(surface)
}
