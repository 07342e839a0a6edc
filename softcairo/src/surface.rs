//! Reference-counted pixel surfaces.
//!
//! A [`Surface`] is a cheap handle: cloning it (or calling
//! [`Surface::reference`]) shares the same pixels, and the pixels are freed
//! when the last handle is dropped. Pixels are stored with straight
//! (non-premultiplied) alpha in R, G, B, A byte order.

use crate::error::{CairoError, CairoResult, Status};
use crate::geometry::RectangleInt;
use crate::matrix::Matrix;
use std::any::Any;
use std::collections::HashMap;
use std::io::{Read, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockWriteGuard};

/// Maximum surface dimension in pixels.
pub const MAX_DIMENSION: i32 = 32767;

/// Opaque per-surface user data.
pub type UserData = Arc<dyn Any + Send + Sync>;

/// Pixel format of an image surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
    /// Color with alpha, 32 bits per pixel.
    #[default]
    Argb32,
    /// Color only, 32 bits per pixel; alpha is always opaque.
    Rgb24,
    /// Alpha only, 8 bits per pixel.
    A8,
}

impl Format {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Format::Argb32 | Format::Rgb24 => 4,
            Format::A8 => 1,
        }
    }

    pub fn content(self) -> Content {
        match self {
            Format::Argb32 => Content::ColorAlpha,
            Format::Rgb24 => Content::Color,
            Format::A8 => Content::Alpha,
        }
    }

    pub fn from_content(content: Content) -> Self {
        match content {
            Content::ColorAlpha => Format::Argb32,
            Content::Color => Format::Rgb24,
            Content::Alpha => Format::A8,
        }
    }

    /// Row stride for `width` pixels, rounded up to a multiple of 4 bytes.
    pub fn stride_for_width(self, width: i32) -> CairoResult<usize> {
        if !(0..=MAX_DIMENSION).contains(&width) {
            return Err(CairoError::new(
                Status::InvalidStride,
                format!("width {width} out of range"),
            ));
        }
        let row = width as usize * self.bytes_per_pixel();
        Ok((row + 3) & !3)
    }
}

/// What a surface stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Content {
    Color,
    Alpha,
    #[default]
    ColorAlpha,
}

/// Backend kind of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceType {
    Image,
    /// A rectangular view into another surface's pixels.
    Subsurface,
}

/// Owned pixel storage shared between a surface and its subsurfaces.
#[derive(Debug, Clone)]
pub(crate) struct PixelBuffer {
    data: Vec<u8>,
    stride: usize,
    format: Format,
}

impl PixelBuffer {
    fn offset(&self, x: usize, y: usize) -> usize {
        y * self.stride + x * self.format.bytes_per_pixel()
    }

    fn read(&self, x: usize, y: usize) -> [u8; 4] {
        let i = self.offset(x, y);
        match self.format {
            Format::Argb32 => [
                self.data[i],
                self.data[i + 1],
                self.data[i + 2],
                self.data[i + 3],
            ],
            Format::Rgb24 => [self.data[i], self.data[i + 1], self.data[i + 2], 255],
            Format::A8 => [0, 0, 0, self.data[i]],
        }
    }

    fn write(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        let i = self.offset(x, y);
        match self.format {
            Format::Argb32 => self.data[i..i + 4].copy_from_slice(&rgba),
            Format::Rgb24 => {
                self.data[i..i + 3].copy_from_slice(&rgba[..3]);
                self.data[i + 3] = 255;
            }
            Format::A8 => self.data[i] = rgba[3],
        }
    }
}

/// Straight-alpha RGBA copy of a surface, used for sampling.
#[derive(Debug, Clone)]
pub(crate) struct Image {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) pixels: Vec<[u8; 4]>,
}

impl Image {
    pub(crate) fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        self.pixels[y * self.width + x]
    }
}

/// Write access to the pixels of one surface, in the surface's own coordinates.
pub(crate) struct PixelsMut<'a> {
    buffer: RwLockWriteGuard<'a, PixelBuffer>,
    origin_x: usize,
    origin_y: usize,
    width: usize,
    height: usize,
}

impl PixelsMut<'_> {
    pub(crate) fn width(&self) -> usize {
        self.width
    }

    pub(crate) fn height(&self) -> usize {
        self.height
    }

    pub(crate) fn read(&self, x: usize, y: usize) -> [u8; 4] {
        self.buffer.read(self.origin_x + x, self.origin_y + y)
    }

    pub(crate) fn write(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        self.buffer.write(self.origin_x + x, self.origin_y + y, rgba);
    }
}

#[derive(Clone)]
struct SurfaceMeta {
    status: Status,
    finished: bool,
    device_scale: (f64, f64),
    device_offset: (f64, f64),
    fallback_resolution: (f64, f64),
    user_data: HashMap<String, UserData>,
}

impl Default for SurfaceMeta {
    fn default() -> Self {
        Self {
            status: Status::Success,
            finished: false,
            device_scale: (1.0, 1.0),
            device_offset: (0.0, 0.0),
            fallback_resolution: (300.0, 300.0),
            user_data: HashMap::new(),
        }
    }
}

struct SurfaceInner {
    pixels: Arc<RwLock<PixelBuffer>>,
    origin_x: usize,
    origin_y: usize,
    width: usize,
    height: usize,
    format: Format,
    surface_type: SurfaceType,
    meta: Mutex<SurfaceMeta>,
}

impl Drop for SurfaceInner {
    fn drop(&mut self) {
        log::trace!(
            target: "cairo",
            "surface {}x{} {:?} released",
            self.width,
            self.height,
            self.surface_type
        );
    }
}

/// A reference-counted pixel surface.
#[derive(Clone)]
pub struct Surface {
    inner: Arc<SurfaceInner>,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("type", &self.inner.surface_type)
            .field("format", &self.inner.format)
            .field("width", &self.inner.width)
            .field("height", &self.inner.height)
            .field("status", &self.status())
            .finish()
    }
}

fn validate_size(width: i32, height: i32) -> CairoResult<()> {
    if !(0..=MAX_DIMENSION).contains(&width) || !(0..=MAX_DIMENSION).contains(&height) {
        return Err(CairoError::new(
            Status::InvalidSize,
            format!("surface size {width}x{height} out of range"),
        ));
    }
    Ok(())
}

impl Surface {
    fn from_buffer(buffer: PixelBuffer, width: usize, height: usize) -> Self {
        let format = buffer.format;
        Self {
            inner: Arc::new(SurfaceInner {
                pixels: Arc::new(RwLock::new(buffer)),
                origin_x: 0,
                origin_y: 0,
                width,
                height,
                format,
                surface_type: SurfaceType::Image,
                meta: Mutex::new(SurfaceMeta::default()),
            }),
        }
    }

    /// Create a transparent image surface.
    pub fn create_image(format: Format, width: i32, height: i32) -> CairoResult<Surface> {
        validate_size(width, height)?;
        let stride = format.stride_for_width(width)?;
        let data = vec![0u8; stride * height as usize];
        log::trace!(target: "cairo", "create image surface {width}x{height} {format:?}");
        Ok(Self::from_buffer(
            PixelBuffer {
                data,
                stride,
                format,
            },
            width as usize,
            height as usize,
        ))
    }

    /// Wrap caller-provided pixel data.
    ///
    /// `data` holds `height` rows of `stride` bytes in the layout described by
    /// [`Format`]; the stride must be a multiple of 4 and at least
    /// [`Format::stride_for_width`].
    pub fn create_for_data(
        data: Vec<u8>,
        format: Format,
        width: i32,
        height: i32,
        stride: usize,
    ) -> CairoResult<Surface> {
        validate_size(width, height)?;
        let min_stride = format.stride_for_width(width)?;
        if stride < min_stride || stride % 4 != 0 {
            return Err(CairoError::new(
                Status::InvalidStride,
                format!("stride {stride} invalid for width {width}"),
            ));
        }
        if data.len() < stride * height as usize {
            return Err(CairoError::new(
                Status::InvalidStride,
                format!(
                    "buffer of {} bytes too small for {height} rows of {stride}",
                    data.len()
                ),
            ));
        }
        Ok(Self::from_buffer(
            PixelBuffer {
                data,
                stride,
                format,
            },
            width as usize,
            height as usize,
        ))
    }

    /// Decode a PNG stream into a new image surface.
    ///
    /// Images with an alpha channel become `Argb32`, others `Rgb24`.
    pub fn create_from_png<R: Read>(reader: R) -> CairoResult<Surface> {
        let mut decoder = png::Decoder::new(reader);
        decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
        let mut reader = decoder.read_info()?;
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf)?;

        let width = i32::try_from(info.width).unwrap_or(i32::MAX);
        let height = i32::try_from(info.height).unwrap_or(i32::MAX);
        let format = match info.color_type {
            png::ColorType::Rgba | png::ColorType::GrayscaleAlpha => Format::Argb32,
            _ => Format::Rgb24,
        };
        let surface = Self::create_image(format, width, height)?;
        {
            let mut pixels = surface.pixels_mut()?;
            for (y, row) in buf.chunks(info.line_size).take(info.height as usize).enumerate() {
                for x in 0..info.width as usize {
                    let rgba = match info.color_type {
                        png::ColorType::Rgba => {
                            [row[x * 4], row[x * 4 + 1], row[x * 4 + 2], row[x * 4 + 3]]
                        }
                        png::ColorType::Rgb => [row[x * 3], row[x * 3 + 1], row[x * 3 + 2], 255],
                        png::ColorType::GrayscaleAlpha => {
                            let g = row[x * 2];
                            [g, g, g, row[x * 2 + 1]]
                        }
                        _ => {
                            let g = row[x];
                            [g, g, g, 255]
                        }
                    };
                    pixels.write(x, y, rgba);
                }
            }
        }
        Ok(surface)
    }

    /// Another handle to the same surface.
    pub fn reference(&self) -> Surface {
        self.clone()
    }

    /// Number of live handles to this surface.
    pub fn reference_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Release this handle. The pixels are freed with the last handle.
    pub fn destroy(self) {}

    fn meta(&self) -> MutexGuard<'_, SurfaceMeta> {
        self.inner.meta.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn status(&self) -> Status {
        self.meta().status
    }

    /// Record the first error on this surface; later errors are ignored.
    pub(crate) fn poison(&self, status: Status) {
        let mut meta = self.meta();
        if meta.status.is_success() && !status.is_success() {
            log::warn!(target: "cairo", "surface entered error status: {status}");
            meta.status = status;
        }
    }

    /// `Ok` when the surface is usable for drawing.
    pub(crate) fn check(&self) -> CairoResult<()> {
        let meta = self.meta();
        if !meta.status.is_success() {
            return Err(meta.status.into());
        }
        if meta.finished {
            return Err(Status::SurfaceFinished.into());
        }
        Ok(())
    }

    /// Whether two handles refer to the same surface.
    pub fn ptr_eq(&self, other: &Surface) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn surface_type(&self) -> SurfaceType {
        self.inner.surface_type
    }

    pub fn content(&self) -> Content {
        self.inner.format.content()
    }

    pub fn format(&self) -> Format {
        self.inner.format
    }

    pub fn width(&self) -> i32 {
        self.inner.width as i32
    }

    pub fn height(&self) -> i32 {
        self.inner.height as i32
    }

    /// Bytes per row of the underlying buffer.
    pub fn stride(&self) -> usize {
        self.inner
            .pixels
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .stride
    }

    /// Attach (or with `None`, remove) user data under `key`.
    pub fn set_user_data(&self, key: &str, data: Option<UserData>) -> CairoResult<()> {
        let mut meta = self.meta();
        if !meta.status.is_success() {
            return Err(meta.status.into());
        }
        match data {
            Some(data) => {
                meta.user_data.insert(key.to_string(), data);
            }
            None => {
                meta.user_data.remove(key);
            }
        }
        Ok(())
    }

    pub fn get_user_data(&self, key: &str) -> Option<UserData> {
        self.meta().user_data.get(key).cloned()
    }

    /// Complete any pending drawing. Drawing is synchronous, so this only logs.
    pub fn flush(&self) {
        log::trace!(target: "cairo", "surface flush");
    }

    /// Tell the surface its whole buffer was modified externally.
    ///
    /// For `Argb32` surfaces the buffer is taken to hold premultiplied
    /// pixels and is converted back to straight alpha.
    pub fn mark_dirty(&self) -> CairoResult<()> {
        self.mark_dirty_rectangle(0, 0, self.width(), self.height())
    }

    /// Like [`mark_dirty`](Self::mark_dirty), limited to a rectangle.
    pub fn mark_dirty_rectangle(&self, x: i32, y: i32, width: i32, height: i32) -> CairoResult<()> {
        if let Err(e) = self.check() {
            self.poison(e.status());
            return Err(e);
        }
        if self.format() != Format::Argb32 {
            return Ok(());
        }
        let area = RectangleInt::new(x, y, width, height)
            .intersect(&RectangleInt::new(0, 0, self.width(), self.height()));
        if area.is_empty() {
            return Ok(());
        }
        let mut pixels = self.pixels_mut()?;
        for py in area.y..area.y + area.height {
            for px in area.x..area.x + area.width {
                let (px, py) = (px as usize, py as usize);
                let [r, g, b, a] = pixels.read(px, py);
                let unpremultiply = |c: u8| -> u8 {
                    ((u32::from(c) * 255 + u32::from(a) / 2) / u32::from(a)).min(255) as u8
                };
                let straight = if a == 0 {
                    [0, 0, 0, 0]
                } else {
                    [unpremultiply(r), unpremultiply(g), unpremultiply(b), a]
                };
                pixels.write(px, py, straight);
            }
        }
        Ok(())
    }

    /// Finish the surface. Drawing to a finished surface fails with
    /// `SurfaceFinished`; the pixels stay readable.
    pub fn finish(&self) {
        let mut meta = self.meta();
        if !meta.finished {
            log::trace!(target: "cairo", "surface finished");
            meta.finished = true;
        }
    }

    pub fn is_finished(&self) -> bool {
        self.meta().finished
    }

    /// New transparent surface with the given content, compatible with this one.
    pub fn create_similar(&self, content: Content, width: i32, height: i32) -> CairoResult<Surface> {
        self.create_similar_image(Format::from_content(content), width, height)
    }

    /// New transparent image surface that inherits this surface's device scale.
    pub fn create_similar_image(
        &self,
        format: Format,
        width: i32,
        height: i32,
    ) -> CairoResult<Surface> {
        self.check()?;
        let surface = Self::create_image(format, width, height)?;
        let (sx, sy) = self.device_scale();
        surface.meta().device_scale = (sx, sy);
        Ok(surface)
    }

    /// A surface that draws into a rectangle of this one.
    ///
    /// The rectangle is in this surface's device-scaled coordinates and is
    /// clipped to the surface. The result shares this surface's pixels.
    pub fn create_for_rectangle(
        &self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> CairoResult<Surface> {
        self.check()?;
        let (sx, sy) = self.device_scale();
        let rect = RectangleInt::new(
            (x * sx).floor() as i32,
            (y * sy).floor() as i32,
            (width * sx).ceil() as i32,
            (height * sy).ceil() as i32,
        )
        .intersect(&RectangleInt::new(0, 0, self.width(), self.height()));

        let meta = SurfaceMeta {
            device_scale: (sx, sy),
            ..SurfaceMeta::default()
        };
        log::trace!(target: "cairo", "create subsurface {rect:?}");
        Ok(Surface {
            inner: Arc::new(SurfaceInner {
                pixels: Arc::clone(&self.inner.pixels),
                origin_x: self.inner.origin_x + rect.x as usize,
                origin_y: self.inner.origin_y + rect.y as usize,
                width: rect.width as usize,
                height: rect.height as usize,
                format: self.inner.format,
                surface_type: SurfaceType::Subsurface,
                meta: Mutex::new(meta),
            }),
        })
    }

    pub fn device_scale(&self) -> (f64, f64) {
        self.meta().device_scale
    }

    pub fn set_device_scale(&self, sx: f64, sy: f64) -> CairoResult<()> {
        if sx == 0.0 || sy == 0.0 || !sx.is_finite() || !sy.is_finite() {
            self.poison(Status::InvalidMatrix);
            return Err(CairoError::new(
                Status::InvalidMatrix,
                format!("invalid device scale {sx}x{sy}"),
            ));
        }
        let mut meta = self.meta();
        if meta.status.is_success() {
            meta.device_scale = (sx, sy);
        }
        Ok(())
    }

    pub fn device_offset(&self) -> (f64, f64) {
        self.meta().device_offset
    }

    pub fn set_device_offset(&self, x: f64, y: f64) {
        let mut meta = self.meta();
        if meta.status.is_success() {
            meta.device_offset = (x, y);
        }
    }

    pub fn fallback_resolution(&self) -> (f64, f64) {
        self.meta().fallback_resolution
    }

    /// Resolution in pixels per inch used for fallback rasterization.
    pub fn set_fallback_resolution(&self, x_ppi: f64, y_ppi: f64) -> CairoResult<()> {
        if !(x_ppi > 0.0 && y_ppi > 0.0) {
            self.poison(Status::InvalidMatrix);
            return Err(CairoError::new(
                Status::InvalidMatrix,
                format!("invalid fallback resolution {x_ppi}x{y_ppi}"),
            ));
        }
        let mut meta = self.meta();
        if meta.status.is_success() {
            meta.fallback_resolution = (x_ppi, y_ppi);
        }
        Ok(())
    }

    /// Image surfaces are not paginated.
    pub fn copy_page(&self) {}

    /// Image surfaces are not paginated.
    pub fn show_page(&self) {}

    /// Device-space transform of this surface: user-space points are scaled
    /// by the device scale, then shifted by the device offset.
    pub(crate) fn device_transform(&self) -> Matrix {
        let meta = self.meta();
        let (sx, sy) = meta.device_scale;
        let (ox, oy) = meta.device_offset;
        Matrix::new(sx, 0.0, 0.0, sy, ox, oy)
    }

    /// Straight-alpha RGBA of one pixel, or `None` outside the surface.
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        if x < 0 || y < 0 || x >= self.width() || y >= self.height() {
            return None;
        }
        let buffer = self
            .inner
            .pixels
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Some(buffer.read(
            self.inner.origin_x + x as usize,
            self.inner.origin_y + y as usize,
        ))
    }

    /// Copy of this surface's rows in its format's layout, tightly strided per
    /// [`Format::stride_for_width`].
    pub fn data(&self) -> Vec<u8> {
        let buffer = self
            .inner
            .pixels
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let bpp = self.inner.format.bytes_per_pixel();
        let row_len = self.inner.width * bpp;
        let stride = (row_len + 3) & !3;
        let mut out = vec![0u8; stride * self.inner.height];
        for y in 0..self.inner.height {
            let src = buffer.offset(self.inner.origin_x, self.inner.origin_y + y);
            out[y * stride..y * stride + row_len].copy_from_slice(&buffer.data[src..src + row_len]);
        }
        out
    }

    /// Run `f` over the raw buffer starting at this surface's first pixel,
    /// together with the buffer stride.
    pub fn with_data_mut<R>(&self, f: impl FnOnce(&mut [u8], usize) -> R) -> CairoResult<R> {
        self.check()?;
        let mut buffer = self
            .inner
            .pixels
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let start = buffer.offset(self.inner.origin_x, self.inner.origin_y);
        let stride = buffer.stride;
        Ok(f(&mut buffer.data[start..], stride))
    }

    /// Write access for the rasterizer.
    pub(crate) fn pixels_mut(&self) -> CairoResult<PixelsMut<'_>> {
        self.check()?;
        Ok(PixelsMut {
            buffer: self
                .inner
                .pixels
                .write()
                .unwrap_or_else(PoisonError::into_inner),
            origin_x: self.inner.origin_x,
            origin_y: self.inner.origin_y,
            width: self.inner.width,
            height: self.inner.height,
        })
    }

    /// Copy the pixels for sampling as a pattern source.
    pub(crate) fn snapshot(&self) -> Image {
        let buffer = self
            .inner
            .pixels
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let (w, h) = (self.inner.width, self.inner.height);
        let mut pixels = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                pixels.push(buffer.read(self.inner.origin_x + x, self.inner.origin_y + y));
            }
        }
        Image {
            width: w,
            height: h,
            pixels,
        }
    }

    /// Encode the surface as PNG bytes.
    pub fn to_png(&self) -> CairoResult<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_to_png(&mut buf)?;
        Ok(buf)
    }

    /// Encode the surface as PNG into `writer`.
    ///
    /// `Argb32` is written as RGBA, `Rgb24` as RGB and `A8` as grayscale.
    pub fn write_to_png<W: Write>(&self, writer: W) -> CairoResult<()> {
        let image = self.snapshot();
        let (color, data): (png::ColorType, Vec<u8>) = match self.format() {
            Format::Argb32 => (
                png::ColorType::Rgba,
                image.pixels.iter().flatten().copied().collect(),
            ),
            Format::Rgb24 => (
                png::ColorType::Rgb,
                image.pixels.iter().flat_map(|p| [p[0], p[1], p[2]]).collect(),
            ),
            Format::A8 => (
                png::ColorType::Grayscale,
                image.pixels.iter().map(|p| p[3]).collect(),
            ),
        };

        let mut encoder = png::Encoder::new(writer, image.width as u32, image.height as u32);
        encoder.set_color(color);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(&data)?;
        writer.finish()?;
        Ok(())
    }
}
