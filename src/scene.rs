use egui::{Context, Pos2, Rect, TextureOptions, Vec2};
use log::{debug, info};
use uuid::Uuid;

/// Side length of the square resize-handle region anchored at the selected
/// image's bottom-right corner.
pub const HANDLE_SIZE: f32 = 12.0;

/// Smallest width/height an image can be resized to.
pub const MIN_IMAGE_SIZE: f32 = 2.0;

/// A decoded bitmap ready to be placed on the canvas.
#[derive(Clone)]
pub struct DecodedImage {
    /// Straight RGBA, row-major.
    pub rgba: Vec<u8>,
    pub size: Vec2,
}

impl std::fmt::Debug for DecodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedImage")
            .field("bytes", &self.rgba.len())
            .field("size", &self.size)
            .finish()
    }
}

/// A bitmap placed on the canvas.
pub struct SceneImage {
    id: Uuid,
    rgba: Vec<u8>,
    natural_size: Vec2,
    pub pos: Pos2,
    pub size: Vec2,
    selected: bool,
    texture: Option<egui::TextureHandle>,
}

impl std::fmt::Debug for SceneImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneImage")
            .field("id", &self.id)
            .field("pos", &self.pos)
            .field("size", &self.size)
            .field("selected", &self.selected)
            .finish()
    }
}

impl SceneImage {
    fn new(decoded: DecodedImage, size: Vec2) -> Self {
        Self {
            id: Uuid::new_v4(),
            rgba: decoded.rgba,
            natural_size: decoded.size,
            pos: Pos2::ZERO,
            size,
            selected: false,
            texture: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn selected(&self) -> bool {
        self.selected
    }

    pub fn natural_size(&self) -> Vec2 {
        self.natural_size
    }

    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.pos, self.size)
    }

    /// Axis-aligned bounding-box containment.
    pub fn hit_test(&self, pos: Pos2) -> bool {
        self.rect().contains(pos)
    }

    /// The fixed-size resize-handle region at the bottom-right corner.
    pub fn handle_rect(&self) -> Rect {
        Rect::from_center_size(self.rect().max, Vec2::splat(HANDLE_SIZE))
    }

    /// Upload the bitmap lazily and return its texture id.
    pub fn texture_id(&mut self, ctx: &Context) -> egui::TextureId {
        if self.texture.is_none() {
            let image = egui::ColorImage::from_rgba_unmultiplied(
                [self.natural_size.x as usize, self.natural_size.y as usize],
                &self.rgba,
            );
            self.texture = Some(ctx.load_texture(
                format!("scene_image_{}", self.id),
                image,
                TextureOptions::LINEAR,
            ));
        }
        self.texture.as_ref().map(|t| t.id()).unwrap_or_default()
    }
}

/// Ordered list of placed images plus the current selection.
///
/// Invariant: at most one image has `selected == true`, and `selected_id`
/// always names exactly that image (or nothing). The two are only ever
/// updated together, through [`Scene::select`].
#[derive(Debug, Default)]
pub struct Scene {
    images: Vec<SceneImage>,
    selected: Option<Uuid>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn images(&self) -> &[SceneImage] {
        &self.images
    }

    pub fn images_mut(&mut self) -> &mut [SceneImage] {
        &mut self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn selected_id(&self) -> Option<Uuid> {
        self.selected
    }

    pub fn selected_image(&self) -> Option<&SceneImage> {
        self.selected
            .and_then(|id| self.images.iter().find(|img| img.id == id))
    }

    pub fn image(&self, id: Uuid) -> Option<&SceneImage> {
        self.images.iter().find(|img| img.id == id)
    }

    pub fn image_mut(&mut self, id: Uuid) -> Option<&mut SceneImage> {
        self.images.iter_mut().find(|img| img.id == id)
    }

    /// Place a decoded bitmap at the origin, downscaled uniformly to fit the
    /// canvas if it is larger, and select it.
    pub fn add_image(&mut self, decoded: DecodedImage, canvas: Vec2) -> Uuid {
        let natural = decoded.size;
        let scale = (canvas.x / natural.x).min(canvas.y / natural.y).min(1.0);
        let fitted = natural * scale;
        info!(
            "placed image {}x{} at {}x{}",
            natural.x, natural.y, fitted.x, fitted.y
        );

        let image = SceneImage::new(decoded, fitted);
        let id = image.id;
        self.images.push(image);
        self.select(Some(id));
        id
    }

    /// Set the selection; `None` deselects everything. Selecting an unknown
    /// id deselects everything as well, keeping flags and pointer in sync.
    pub fn select(&mut self, id: Option<Uuid>) {
        let id = id.filter(|wanted| self.images.iter().any(|img| img.id == *wanted));
        for img in &mut self.images {
            img.selected = Some(img.id) == id;
        }
        self.selected = id;
        debug!("selection is now {:?}", id);
    }

    /// First image in list order containing `pos`, if any. On overlap the
    /// earliest-placed image wins; there is no z-order re-sorting on click.
    pub fn hit_test(&self, pos: Pos2) -> Option<Uuid> {
        self.images.iter().find(|img| img.hit_test(pos)).map(|img| img.id)
    }

    /// Remove every image. The only way placed images are destroyed.
    pub fn clear(&mut self) {
        self.images.clear();
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decoded(w: u32, h: u32) -> DecodedImage {
        DecodedImage {
            rgba: vec![255; (w * h * 4) as usize],
            size: Vec2::new(w as f32, h as f32),
        }
    }

    #[test]
    fn add_image_selects_it_and_deselects_others() {
        let mut scene = Scene::new();
        let canvas = Vec2::splat(800.0);
        let a = scene.add_image(decoded(100, 100), canvas);
        let b = scene.add_image(decoded(50, 50), canvas);
        assert_eq!(scene.selected_id(), Some(b));
        assert!(!scene.image(a).unwrap().selected());
        assert_eq!(scene.images().iter().filter(|i| i.selected()).count(), 1);
    }

    #[test]
    fn oversized_import_is_fitted_preserving_aspect() {
        let mut scene = Scene::new();
        let id = scene.add_image(decoded(1600, 800), Vec2::splat(800.0));
        let img = scene.image(id).unwrap();
        assert_eq!(img.size, Vec2::new(800.0, 400.0));
        assert_eq!(img.pos, Pos2::ZERO);
        assert_eq!(img.natural_size(), Vec2::new(1600.0, 800.0));
    }

    #[test]
    fn overlap_hit_test_prefers_first_in_list_order() {
        let mut scene = Scene::new();
        let canvas = Vec2::splat(800.0);
        let a = scene.add_image(decoded(100, 100), canvas);
        let b = scene.add_image(decoded(50, 50), canvas);
        // Both rects contain (25, 25); A was placed first.
        assert_eq!(scene.hit_test(Pos2::new(25.0, 25.0)), Some(a));
        assert_ne!(scene.hit_test(Pos2::new(25.0, 25.0)), Some(b));
    }

    #[test]
    fn selecting_unknown_id_clears_selection() {
        let mut scene = Scene::new();
        scene.add_image(decoded(10, 10), Vec2::splat(800.0));
        scene.select(Some(Uuid::new_v4()));
        assert_eq!(scene.selected_id(), None);
        assert!(scene.images().iter().all(|i| !i.selected()));
    }
}
