use tinct_pixel::{Component, Pixel};

use crate::image::{Image, ImageSize};

/// A rectangle given by its anchor corner and signed extent.
///
/// A negative width or height extends the rectangle to the left or upwards, so that the
/// anchor becomes the far corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    /// The x coordinate of the anchor.
    pub x: i64,
    /// The y coordinate of the anchor.
    pub y: i64,
    /// The signed width.
    pub width: i64,
    /// The signed height.
    pub height: i64,
}

impl Rect {
    /// Creates a rectangle.
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The same rectangle with a non-negative width and height.
    ///
    /// Values falling outside the `i64` range saturate.
    pub fn normalized(self) -> Self {
        let (x, width) = mirror(self.x, self.width);
        let (y, height) = mirror(self.y, self.height);
        Self::new(saturate(x), saturate(y), saturate(width), saturate(height))
    }
}

// Clipping is computed in i128 so that no sum of i64 coordinates can overflow.

// a run of negative length ends at `start`
fn mirror(start: i64, length: i64) -> (i128, i128) {
    let (start, length) = (i128::from(start), i128::from(length));
    if length < 0 {
        (start + length + 1, -length)
    } else {
        (start, length)
    }
}

fn saturate(value: i128) -> i64 {
    value.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

// clips the run `[start, start + length)` to `[0, limit)`
fn clip_run(start: i128, length: i128, limit: usize) -> Option<(usize, usize)> {
    let end = (start + length).min(limit as i128);
    let start = start.max(0);
    (end > start).then_some((start as usize, (end - start) as usize))
}

impl Image {
    /// Copies or blends a region of `src` into this image.
    ///
    /// The region is first clipped against the bounds of `src`, shifting the destination
    /// offset along with it, then against the bounds of this image. A region left empty by
    /// either step does nothing.
    ///
    /// # Arguments
    ///
    /// * `dest_x` - The destination x coordinate of the region's top-left corner.
    /// * `dest_y` - The destination y coordinate of the region's top-left corner.
    /// * `src` - The source image, of any format.
    /// * `region` - The region of `src` to copy. Negative extents are empty.
    /// * `blend` - Whether to composite the source over the destination instead of copying.
    pub fn blit(&mut self, dest_x: i64, dest_y: i64, src: &Image, region: Rect, blend: bool) {
        let (src_width, src_height) = (src.width() as i128, src.height() as i128);
        let (dest_width, dest_height) = (self.width() as i128, self.height() as i128);
        let (Some(src_buffer), Some(dest_buffer)) = (src.buffer(), self.buffer_mut()) else {
            return;
        };

        let (mut dest_x, mut dest_y) = (i128::from(dest_x), i128::from(dest_y));
        let (mut src_x, mut src_y) = (i128::from(region.x), i128::from(region.y));
        let (mut width, mut height) = (i128::from(region.width), i128::from(region.height));

        if width <= 0
            || height <= 0
            || src_x >= src_width
            || src_y >= src_height
            || src_x + width <= 0
            || src_y + height <= 0
        {
            return;
        }
        if src_x < 0 {
            dest_x -= src_x;
            width += src_x;
            src_x = 0;
        }
        if src_y < 0 {
            dest_y -= src_y;
            height += src_y;
            src_y = 0;
        }
        width = width.min(src_width - src_x);
        height = height.min(src_height - src_y);

        if dest_x >= dest_width
            || dest_y >= dest_height
            || dest_x + width <= 0
            || dest_y + height <= 0
        {
            return;
        }
        if dest_x < 0 {
            src_x -= dest_x;
            width += dest_x;
            dest_x = 0;
        }
        if dest_y < 0 {
            src_y -= dest_y;
            height += dest_y;
            dest_y = 0;
        }
        width = width.min(dest_width - dest_x);
        height = height.min(dest_height - dest_y);
        if width <= 0 || height <= 0 {
            return;
        }

        for row in 0..height {
            let src_start = (src_y + row) * src_width + src_x;
            let dest_start = (dest_y + row) * dest_width + dest_x;
            src_buffer.copy_pixel_range(
                src_start as usize,
                width as usize,
                dest_buffer,
                dest_start as usize,
                blend,
            );
        }
    }

    /// Copies the whole of `src` into this image at `(dest_x, dest_y)`.
    pub fn put_image(&mut self, dest_x: i64, dest_y: i64, src: &Image) {
        let region = Rect::new(0, 0, src.width() as i64, src.height() as i64);
        self.blit(dest_x, dest_y, src, region, false);
    }

    /// Blends the whole of `src` over this image at `(dest_x, dest_y)`.
    pub fn draw_image(&mut self, dest_x: i64, dest_y: i64, src: &Image) {
        let region = Rect::new(0, 0, src.width() as i64, src.height() as i64);
        self.blit(dest_x, dest_y, src, region, true);
    }

    fn hor_run<T: Component>(
        &mut self,
        x: i128,
        y: i128,
        length: i128,
        pixel: Pixel<T>,
        blend: bool,
    ) {
        let (width, height) = (self.width(), self.height());
        if y < 0 || y >= height as i128 {
            return;
        }
        let (Some((start, count)), Some(buffer)) = (clip_run(x, length, width), self.buffer_mut())
        else {
            return;
        };
        let start = y as usize * width + start;
        if blend {
            buffer.blend_run(start, count, 1, pixel);
        } else {
            buffer.put_run(start, count, 1, pixel);
        }
    }

    fn vert_run<T: Component>(
        &mut self,
        x: i128,
        y: i128,
        length: i128,
        pixel: Pixel<T>,
        blend: bool,
    ) {
        let (width, height) = (self.width(), self.height());
        if x < 0 || x >= width as i128 {
            return;
        }
        let (Some((start, count)), Some(buffer)) = (clip_run(y, length, height), self.buffer_mut())
        else {
            return;
        };
        let start = start * width + x as usize;
        if blend {
            buffer.blend_run(start, count, width, pixel);
        } else {
            buffer.put_run(start, count, width, pixel);
        }
    }

    fn hor_line<T: Component>(
        &mut self,
        x: i64,
        y: i64,
        length: i64,
        pixel: Pixel<T>,
        blend: bool,
    ) {
        let (x, length) = mirror(x, length);
        self.hor_run(x, i128::from(y), length, pixel, blend);
    }

    fn vert_line<T: Component>(
        &mut self,
        x: i64,
        y: i64,
        length: i64,
        pixel: Pixel<T>,
        blend: bool,
    ) {
        let (y, length) = mirror(y, length);
        self.vert_run(i128::from(x), y, length, pixel, blend);
    }

    /// Blends a horizontal run of `|length|` pixels starting at `(x, y)`.
    ///
    /// A negative length draws leftwards so that the run ends at `(x, y)`. Pixels outside
    /// the image are skipped.
    pub fn draw_hor_line<T: Component>(&mut self, x: i64, y: i64, length: i64, pixel: Pixel<T>) {
        self.hor_line(x, y, length, pixel, true);
    }

    /// Blends a vertical run of `|length|` pixels starting at `(x, y)`.
    ///
    /// A negative length draws upwards so that the run ends at `(x, y)`.
    pub fn draw_vert_line<T: Component>(&mut self, x: i64, y: i64, length: i64, pixel: Pixel<T>) {
        self.vert_line(x, y, length, pixel, true);
    }

    /// Assigns a horizontal run of `|length|` pixels starting at `(x, y)`.
    pub fn put_hor_line<T: Component>(&mut self, x: i64, y: i64, length: i64, pixel: Pixel<T>) {
        self.hor_line(x, y, length, pixel, false);
    }

    /// Assigns a vertical run of `|length|` pixels starting at `(x, y)`.
    pub fn put_vert_line<T: Component>(&mut self, x: i64, y: i64, length: i64, pixel: Pixel<T>) {
        self.vert_line(x, y, length, pixel, false);
    }

    fn rect<T: Component>(&mut self, rect: Rect, pixel: Pixel<T>, filled: bool, blend: bool) {
        let (x, width) = mirror(rect.x, rect.width);
        let (y, height) = mirror(rect.y, rect.height);
        if width == 0 || height == 0 {
            return;
        }
        if filled {
            let rows = y.max(0)..(y + height).min(self.height() as i128);
            for row in rows {
                self.hor_run(x, row, width, pixel, blend);
            }
            return;
        }
        // each border pixel is touched once so blended outlines stay uniform
        self.hor_run(x, y, width, pixel, blend);
        if height > 1 {
            self.hor_run(x, y + height - 1, width, pixel, blend);
        }
        if height > 2 {
            self.vert_run(x, y + 1, height - 2, pixel, blend);
            if width > 1 {
                self.vert_run(x + width - 1, y + 1, height - 2, pixel, blend);
            }
        }
    }

    /// Blends a rectangle, filled or as a one pixel outline.
    pub fn draw_rect<T: Component>(&mut self, rect: Rect, pixel: Pixel<T>, filled: bool) {
        self.rect(rect, pixel, filled, true);
    }

    /// Assigns a rectangle, filled or as a one pixel outline.
    pub fn put_rect<T: Component>(&mut self, rect: Rect, pixel: Pixel<T>, filled: bool) {
        self.rect(rect, pixel, filled, false);
    }

    /// Resizes the canvas, filling new area with transparent black.
    ///
    /// See [`Image::resize_canvas_with`].
    pub fn resize_canvas(&mut self, origin_x: i64, origin_y: i64, size: ImageSize) {
        self.resize_canvas_with(origin_x, origin_y, size, Pixel::<u8>::transparent());
    }

    /// Resizes the canvas without scaling the contents.
    ///
    /// The new canvas keeps the pixel format and recorded file format. The old contents are
    /// copied so that the new canvas' top-left corner lies at `(origin_x, origin_y)` in the
    /// old image; a negative origin moves the old contents right or down. Empty images and
    /// unchanged geometries are left alone.
    ///
    /// # Arguments
    ///
    /// * `origin_x` - The x coordinate of the new top-left corner in the old image.
    /// * `origin_y` - The y coordinate of the new top-left corner in the old image.
    /// * `size` - The new size.
    /// * `fill` - The value of pixels not covered by the old image.
    pub fn resize_canvas_with<T: Component>(
        &mut self,
        origin_x: i64,
        origin_y: i64,
        size: ImageSize,
        fill: Pixel<T>,
    ) {
        if self.is_empty() || (origin_x == 0 && origin_y == 0 && size == self.size()) {
            return;
        }
        log::debug!(
            "resizing canvas from {} to {} at origin ({origin_x}, {origin_y})",
            self.size(),
            size
        );
        let mut canvas = Image::new(size, fill, self.pixel_format());
        canvas.put_image(-origin_x, -origin_y, self);
        canvas.set_original_file_format(self.original_file_format());
        self.swap(&mut canvas);
    }
}
