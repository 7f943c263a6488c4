use serde::{Deserialize, Serialize};

use crate::error::{Result, SphereError};

/// Layout of one dual-fisheye source frame.
///
/// A frame holds three regions side by side: a side face, the center face
/// and another side face. Side regions are wider than the center because
/// they carry an internal overlap band of `blend_width` pixels that is
/// cross-faded when the face is reassembled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameTemplate {
    /// Identifier used in the projection table cache key.
    pub id: u32,
    pub name: String,
    pub width: usize,
    pub height: usize,
    pub side_width: usize,
    pub center_width: usize,
    pub blend_width: usize,
    /// Output width used when none is requested.
    pub equirect_width: usize,
}

impl FrameTemplate {
    /// GoPro MAX 5.6K frames (4096x1344 per track).
    pub fn max_5k6() -> Self {
        Self {
            id: 0,
            name: "max-5.6k".into(),
            width: 4096,
            height: 1344,
            side_width: 1376,
            center_width: 1344,
            blend_width: 32,
            equirect_width: 5376,
        }
    }

    /// GoPro MAX 3K frames (2272x736 per track).
    pub fn max_3k() -> Self {
        Self {
            id: 1,
            name: "max-3k".into(),
            width: 2272,
            height: 736,
            side_width: 768,
            center_width: 736,
            blend_width: 16,
            equirect_width: 2944,
        }
    }

    /// Blend band width as a fraction of the side region.
    pub fn blend_fraction(&self) -> f64 {
        self.blend_width as f64 / self.side_width as f64
    }

    /// Left edge of the right-hand side region.
    pub fn right_region_x(&self) -> usize {
        self.side_width + self.center_width
    }

    pub fn matches(&self, width: u32, height: u32) -> bool {
        self.width == width as usize && self.height == height as usize
    }

    /// Check the layout is internally consistent.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 || self.side_width == 0 || self.center_width == 0 {
            return Err(SphereError::InvalidTemplate(format!(
                "template {} ({}) has a zero dimension",
                self.id, self.name
            )));
        }
        if 2 * self.side_width + self.center_width != self.width {
            return Err(SphereError::InvalidTemplate(format!(
                "template {} ({}): 2 x side {} + center {} != width {}",
                self.id, self.name, self.side_width, self.center_width, self.width
            )));
        }
        if self.blend_width == 0 || 4 * self.blend_width >= self.side_width {
            return Err(SphereError::InvalidTemplate(format!(
                "template {} ({}): blend width {} must be non-zero and under a quarter of side width {}",
                self.id, self.name, self.blend_width, self.side_width
            )));
        }
        if self.equirect_width < 4 {
            return Err(SphereError::InvalidTemplate(format!(
                "template {} ({}): equirect width {} is too small",
                self.id, self.name, self.equirect_width
            )));
        }
        Ok(())
    }
}

/// The set of frame layouts a run can auto-detect.
#[derive(Clone, Debug)]
pub struct TemplateRegistry {
    templates: Vec<FrameTemplate>,
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TemplateRegistry {
    /// The hardware layouts known out of the box.
    pub fn builtin() -> Self {
        Self {
            templates: vec![FrameTemplate::max_5k6(), FrameTemplate::max_3k()],
        }
    }

    /// Built-in layouts followed by user-declared ones.
    ///
    /// Every extra template is validated and ids must be unique across the
    /// whole registry since they key the projection table cache.
    pub fn with_extra(extra: &[FrameTemplate]) -> Result<Self> {
        let mut registry = Self::builtin();
        for template in extra {
            template.validate()?;
            if registry.templates.iter().any(|t| t.id == template.id) {
                return Err(SphereError::InvalidTemplate(format!(
                    "duplicate template id {}",
                    template.id
                )));
            }
            registry.templates.push(template.clone());
        }
        Ok(registry)
    }

    pub fn templates(&self) -> &[FrameTemplate] {
        &self.templates
    }

    pub fn by_id(&self, id: u32) -> Option<&FrameTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// First template whose frame size matches exactly.
    pub fn detect(&self, width: u32, height: u32) -> Result<&FrameTemplate> {
        self.templates
            .iter()
            .find(|t| t.matches(width, height))
            .ok_or(SphereError::UnknownTemplate { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_templates_are_valid() {
        for t in TemplateRegistry::builtin().templates() {
            t.validate().unwrap();
        }
    }

    #[test]
    fn test_detect_builtin() {
        let registry = TemplateRegistry::builtin();
        assert_eq!(registry.detect(4096, 1344).unwrap().id, 0);
        assert_eq!(registry.detect(2272, 736).unwrap().id, 1);
        assert!(matches!(
            registry.detect(1920, 1080),
            Err(SphereError::UnknownTemplate { width: 1920, height: 1080 })
        ));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut t = FrameTemplate::max_3k();
        t.name = "copy".into();
        assert!(TemplateRegistry::with_extra(&[t]).is_err());
    }

    #[test]
    fn test_inconsistent_widths_rejected() {
        let mut t = FrameTemplate::max_3k();
        t.id = 9;
        t.width += 2;
        assert!(t.validate().is_err());
    }
}
