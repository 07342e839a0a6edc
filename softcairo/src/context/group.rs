//! Offscreen groups.

use super::Context;
use crate::error::{CairoError, CairoResult, Status};
use crate::pattern::Pattern;
use crate::surface::{Content, Surface};

impl Context {
    /// Redirect drawing to a new transparent color+alpha surface until the
    /// matching `pop_group`.
    pub fn push_group(&mut self) -> CairoResult<()> {
        self.push_group_with_content(Content::ColorAlpha)
    }

    /// Like [`Context::push_group`] with an explicit content type for the
    /// intermediate surface.
    ///
    /// The group surface matches the current target's size, device scale and
    /// device offset. The whole graphics state is saved, so the group starts
    /// with the current source, transform and clip.
    pub fn push_group_with_content(&mut self, content: Content) -> CairoResult<()> {
        log::debug!(target: "cairo", "push_group {content:?}");
        self.check()?;
        let parent = self.state.target.reference();
        let group = match parent.create_similar(content, parent.width(), parent.height()) {
            Ok(group) => group,
            Err(e) => return self.fail(e),
        };
        let (ox, oy) = parent.device_offset();
        group.set_device_offset(ox, oy);

        self.save();
        self.state.target = group;
        self.state.pushed_group = true;
        Ok(())
    }

    /// Finish the innermost group and return it as a surface pattern.
    ///
    /// The pattern's matrix is the restored CTM, so painting it with that
    /// transform puts the group content back where it was drawn. Fails with
    /// `InvalidPopGroup` when no group is open.
    pub fn pop_group(&mut self) -> CairoResult<Pattern> {
        log::debug!(target: "cairo", "pop_group");
        self.check()?;
        if !self.state.pushed_group {
            return self.fail(CairoError::new(
                Status::InvalidPopGroup,
                "pop_group without matching push_group",
            ));
        }
        let Some(group_state) = self.pop_state() else {
            return self.fail(CairoError::new(
                Status::InvalidPopGroup,
                "group state missing from the stack",
            ));
        };
        let group = group_state.target.reference();
        group.flush();

        let pattern = Pattern::create_for_surface(&group);
        if let Err(e) = pattern.set_matrix(self.state.ctm) {
            return self.fail(e);
        }
        Ok(pattern)
    }

    /// Finish the innermost group and make it the current source.
    pub fn pop_group_to_source(&mut self) -> CairoResult<()> {
        let pattern = self.pop_group()?;
        self.set_source(&pattern)
    }

    /// Surface currently being drawn to: the innermost group's surface, or
    /// the original target when no group is open.
    pub fn get_group_target(&self) -> Surface {
        self.state.target.reference()
    }
}

#[cfg(test)]
mod tests {
    use crate::context::Context;
    use crate::error::Status;
    use crate::pattern::PatternType;
    use crate::surface::{Content, Format, Surface};

    fn setup() -> (Surface, Context) {
        let surface = Surface::create_image(Format::Argb32, 8, 8).unwrap();
        let ctx = Context::new(&surface);
        (surface, ctx)
    }

    #[test]
    fn test_group_draws_offscreen() {
        let (surface, mut ctx) = setup();
        ctx.push_group().unwrap();
        let group = ctx.get_group_target();
        assert!(!group.ptr_eq(&surface));
        assert!(ctx.target().ptr_eq(&surface));
        ctx.set_source_rgb(1.0, 0.0, 0.0);
        ctx.paint().unwrap();
        assert_eq!(surface.get_pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(group.get_pixel(0, 0), Some([255, 0, 0, 255]));

        let pattern = ctx.pop_group().unwrap();
        assert_eq!(pattern.pattern_type(), PatternType::Surface);
        assert!(ctx.get_group_target().ptr_eq(&surface));
    }

    #[test]
    fn test_pop_group_to_source_composites_back() {
        let (surface, mut ctx) = setup();
        ctx.push_group().unwrap();
        ctx.set_source_rgb(0.0, 0.0, 1.0);
        ctx.rectangle(0.0, 0.0, 4.0, 8.0);
        ctx.fill().unwrap();
        ctx.pop_group_to_source().unwrap();
        ctx.paint_with_alpha(0.5).unwrap();
        assert_eq!(surface.get_pixel(1, 1), Some([0, 0, 255, 128]));
        assert_eq!(surface.get_pixel(6, 1), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_group_under_translation_lands_in_place() {
        let (surface, mut ctx) = setup();
        ctx.translate(2.0, 2.0).unwrap();
        ctx.push_group().unwrap();
        ctx.rectangle(0.0, 0.0, 2.0, 2.0);
        ctx.fill().unwrap();
        ctx.pop_group_to_source().unwrap();
        ctx.paint().unwrap();
        assert_eq!(surface.get_pixel(2, 2), Some([0, 0, 0, 255]));
        assert_eq!(surface.get_pixel(3, 3), Some([0, 0, 0, 255]));
        assert_eq!(surface.get_pixel(1, 1), Some([0, 0, 0, 0]));
        assert_eq!(surface.get_pixel(4, 4), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_group_state_is_restored() {
        let (_surface, mut ctx) = setup();
        ctx.set_line_width(3.0);
        ctx.push_group_with_content(Content::Alpha).unwrap();
        assert_eq!(ctx.get_group_target().format(), Format::A8);
        ctx.set_line_width(7.0);
        ctx.pop_group().unwrap();
        assert_eq!(ctx.get_line_width(), 3.0);
        assert_eq!(ctx.save_depth(), 0);
    }

    #[test]
    fn test_pop_group_without_push() {
        let (_surface, mut ctx) = setup();
        assert_eq!(ctx.pop_group().unwrap_err(), Status::InvalidPopGroup);
        assert_eq!(ctx.status(), Status::InvalidPopGroup);
    }

    #[test]
    fn test_restore_cannot_close_group() {
        let (_surface, mut ctx) = setup();
        ctx.push_group().unwrap();
        assert_eq!(ctx.restore().unwrap_err(), Status::InvalidRestore);
    }

    #[test]
    fn test_pop_group_after_inner_save_fails() {
        let (_surface, mut ctx) = setup();
        ctx.push_group().unwrap();
        ctx.save();
        assert_eq!(ctx.pop_group().unwrap_err(), Status::InvalidPopGroup);
    }
}
