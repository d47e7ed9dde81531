//! CPU canvas that draws buttons into an RGBA image

use std::collections::HashMap;
use std::path::Path;

use image::{imageops, Rgba, RgbaImage};
use sheen_ui::{Canvas, Color, Corner, ImageResource, Point, Rect, Rounding};

pub struct SoftwareCanvas {
    image: RgbaImage,
    /// Loaded button images; `None` remembers a failed load
    images: HashMap<String, Option<RgbaImage>>,
}

impl SoftwareCanvas {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba(background.to_array())),
            images: HashMap::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn clear(&mut self, background: Color) {
        for pixel in self.image.pixels_mut() {
            *pixel = Rgba(background.to_array());
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let Rgba([r, g, b, a]) = *self.image.get_pixel(x, y);
        Some(Color::rgba(r, g, b, a))
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn save(&self, path: impl AsRef<Path>) -> image::ImageResult<()> {
        self.image.save(path)
    }

    /// Source-over blend of one pixel; out-of-bounds writes are dropped
    fn blend(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x as u32 >= self.width() || y as u32 >= self.height() {
            return;
        }
        let dst = self.image.get_pixel_mut(x as u32, y as u32);
        let alpha = color.a as u32;
        if alpha == 255 {
            *dst = Rgba(color.to_array());
            return;
        }
        let src = [color.r, color.g, color.b];
        for (channel, value) in dst.0.iter_mut().take(3).zip(src) {
            *channel = ((value as u32 * alpha + *channel as u32 * (255 - alpha)) / 255) as u8;
        }
        dst.0[3] = (alpha + dst.0[3] as u32 * (255 - alpha) / 255).min(255) as u8;
    }

    /// Pixel rows and columns of `area` that fall on the image
    fn clip(&self, area: Rect) -> Option<(std::ops::Range<i32>, std::ops::Range<i32>)> {
        let xs = area.x.max(0)..area.right().min(self.width() as i32);
        let ys = area.y.max(0)..area.bottom().min(self.height() as i32);
        (!xs.is_empty() && !ys.is_empty()).then_some((xs, ys))
    }

    fn load(&mut self, key: &str) -> Option<&RgbaImage> {
        self.images
            .entry(key.to_string())
            .or_insert_with(|| match image::open(key) {
                Ok(img) => Some(img.into_rgba8()),
                Err(e) => {
                    log::warn!("Failed to load button image {}: {}", key, e);
                    None
                }
            })
            .as_ref()
    }
}

/// Whether pixel `(x, y)` of `area` lies outside its rounded corners
fn outside_corner(area: Rect, rounding: &Rounding, x: i32, y: i32) -> bool {
    let limit = (area.width.min(area.height) / 2).max(0) as f32;
    let px = x as f32 + 0.5;
    let py = y as f32 + 0.5;

    let corners = [
        (Corner::TopLeft, area.x as f32, area.y as f32, 1.0, 1.0),
        (Corner::TopRight, area.right() as f32, area.y as f32, -1.0, 1.0),
        (Corner::BottomLeft, area.x as f32, area.bottom() as f32, 1.0, -1.0),
        (Corner::BottomRight, area.right() as f32, area.bottom() as f32, -1.0, -1.0),
    ];

    corners.iter().any(|&(corner, cx, cy, sx, sy)| {
        let radius = (rounding.corner(corner) as f32).min(limit);
        if radius <= 0.0 {
            return false;
        }
        // Centre of the corner arc
        let ox = cx + sx * radius;
        let oy = cy + sy * radius;
        let in_corner_square = (px - ox) * sx < 0.0 && (py - oy) * sy < 0.0;
        in_corner_square && (px - ox).powi(2) + (py - oy).powi(2) > radius * radius
    })
}

impl Canvas for SoftwareCanvas {
    fn draw_rounded_rect(&mut self, color: Color, area: Rect, rounding: &Rounding) {
        let Some((xs, ys)) = self.clip(area) else {
            return;
        };
        for y in ys {
            for x in xs.clone() {
                if !outside_corner(area, rounding, x, y) {
                    self.blend(x, y, color);
                }
            }
        }
    }

    fn draw_circle(&mut self, color: Color, center: Point, radius: u32, stroke_width: u32) {
        let outer = radius as f32;
        let inner = if stroke_width == 0 {
            -1.0
        } else {
            outer - stroke_width as f32
        };
        let r = radius as i32;
        for y in center.y - r..=center.y + r {
            for x in center.x - r..=center.x + r {
                let dx = (x - center.x) as f32;
                let dy = (y - center.y) as f32;
                let distance = (dx * dx + dy * dy).sqrt();
                if distance <= outer && distance > inner {
                    self.blend(x, y, color);
                }
            }
        }
    }

    fn blit(&mut self, image: &ImageResource, area: Rect) {
        if area.width <= 0 || area.height <= 0 {
            return;
        }
        let Some(source) = self.load(image.key()) else {
            return;
        };
        let scaled = imageops::resize(
            source,
            area.width as u32,
            area.height as u32,
            imageops::FilterType::Triangle,
        );
        for (x, y, pixel) in scaled.enumerate_pixels() {
            let Rgba([r, g, b, a]) = *pixel;
            self.blend(area.x + x as i32, area.y + y as i32, Color::rgba(r, g, b, a));
        }
    }

    fn draw_text(&mut self, text: &str, area: Rect) {
        // No font rasterizer here; labels only show up in the log
        log::trace!("Text {:?} at {:?}", text, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheen_ui::EdgeRounding;

    fn canvas() -> SoftwareCanvas {
        SoftwareCanvas::new(40, 40, Color::WHITE)
    }

    #[test]
    fn test_square_rect_fills_area() {
        let mut canvas = canvas();
        canvas.draw_rounded_rect(Color::BLUE, Rect::new(5, 5, 10, 10), &Rounding::default());

        assert_eq!(canvas.pixel(5, 5), Some(Color::BLUE));
        assert_eq!(canvas.pixel(14, 14), Some(Color::BLUE));
        assert_eq!(canvas.pixel(15, 15), Some(Color::WHITE));
        assert_eq!(canvas.pixel(4, 5), Some(Color::WHITE));
    }

    #[test]
    fn test_rounded_corners_are_cut_per_corner() {
        let mut canvas = canvas();
        let rounding = EdgeRounding {
            top_left: 8,
            ..EdgeRounding::default()
        }
        .finish();
        canvas.draw_rounded_rect(Color::BLUE, Rect::new(0, 0, 20, 20), &rounding);

        assert_eq!(canvas.pixel(0, 0), Some(Color::WHITE));
        assert_eq!(canvas.pixel(19, 0), Some(Color::BLUE));
        assert_eq!(canvas.pixel(0, 19), Some(Color::BLUE));
        assert_eq!(canvas.pixel(10, 10), Some(Color::BLUE));
    }

    #[test]
    fn test_radius_is_clamped_to_half_the_short_side() {
        let mut canvas = canvas();
        let rounding = EdgeRounding::uniform(100).finish();
        canvas.draw_rounded_rect(Color::BLUE, Rect::new(0, 0, 20, 10), &rounding);

        // Still filled through the middle of the pill
        assert_eq!(canvas.pixel(10, 5), Some(Color::BLUE));
        assert_eq!(canvas.pixel(0, 0), Some(Color::WHITE));
    }

    #[test]
    fn test_translucent_fill_blends() {
        let mut canvas = SoftwareCanvas::new(4, 4, Color::WHITE);
        canvas.draw_rounded_rect(Color::rgba(0, 0, 0, 128), Rect::new(0, 0, 4, 4), &Rounding::default());

        let pixel = canvas.pixel(1, 1).unwrap();
        assert!(pixel.r > 120 && pixel.r < 135);
        assert_eq!(pixel.a, 255);
    }

    #[test]
    fn test_offscreen_draws_are_clipped() {
        let mut canvas = canvas();
        canvas.draw_rounded_rect(Color::BLUE, Rect::new(-10, -10, 15, 15), &Rounding::default());
        canvas.draw_rounded_rect(Color::BLUE, Rect::new(100, 100, 5, 5), &Rounding::default());
        canvas.draw_circle(Color::BLUE, Point::new(0, 0), 3, 0);

        assert_eq!(canvas.pixel(4, 4), Some(Color::BLUE));
        assert_eq!(canvas.pixel(6, 6), Some(Color::WHITE));
    }

    #[test]
    fn test_circle_stroke_leaves_centre() {
        let mut canvas = canvas();
        canvas.draw_circle(Color::BLUE, Point::new(20, 20), 10, 2);
        assert_eq!(canvas.pixel(20, 20), Some(Color::WHITE));
        assert_eq!(canvas.pixel(30, 20), Some(Color::BLUE));

        canvas.draw_circle(Color::BLUE, Point::new(20, 20), 5, 0);
        assert_eq!(canvas.pixel(20, 20), Some(Color::BLUE));
    }

    #[test]
    fn test_blit_scales_and_missing_image_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("red.png");
        RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255])).save(&path).unwrap();

        let mut canvas = canvas();
        let key = ImageResource::new(path.to_string_lossy());
        canvas.blit(&key, Rect::new(10, 10, 8, 8));
        assert_eq!(canvas.pixel(13, 13), Some(Color::rgb(255, 0, 0)));
        assert_eq!(canvas.pixel(18, 18), Some(Color::WHITE));

        canvas.blit(&ImageResource::new("missing.png"), Rect::new(0, 0, 8, 8));
        assert_eq!(canvas.pixel(0, 0), Some(Color::WHITE));
        assert_eq!(canvas.images.len(), 2);
    }
}
