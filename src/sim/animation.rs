//! Sprite-sheet animation cycling
//!
//! Flight frames are cut left to right out of a fixed-size sheet; any
//! remainder narrower than one frame is dropped. The cycler owns the frame
//! index and cadence; the presentation layer owns the pixels.

use super::SimError;

/// Dimensions of a sprite sheet the presentation layer has loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetLayout {
    pub width: u32,
    pub height: u32,
}

/// Source rectangle of one frame within the sheet, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// Cycles through the frames of a sprite sheet on a fixed cadence
#[derive(Debug, Clone, PartialEq)]
pub struct FrameCycler {
    frame_count: u32,
    frame_width: u32,
    frame_height: u32,
    index: u32,
    timer: u32,
    cadence: u32,
    facing_right: bool,
    /// Mirror latched for the currently displayed frame
    mirrored: bool,
}

impl FrameCycler {
    pub fn new(
        sheet: SheetLayout,
        frame_width: u32,
        frame_height: u32,
        cadence: u32,
    ) -> Result<Self, SimError> {
        if frame_width == 0 || frame_height == 0 || cadence == 0 {
            return Err(SimError::InvalidFrameSpec);
        }
        if sheet.height < frame_height {
            return Err(SimError::SheetTooShort {
                sheet_height: sheet.height,
                frame_height,
            });
        }
        let frame_count = sheet.width / frame_width;
        if frame_count == 0 {
            return Err(SimError::EmptyFrameSequence {
                sheet_width: sheet.width,
                frame_width,
            });
        }
        Ok(Self {
            frame_count,
            frame_width,
            frame_height,
            index: 0,
            timer: 0,
            cadence,
            facing_right: true,
            mirrored: false,
        })
    }

    /// Advance the per-tick counter, stepping to the next frame at the cadence.
    ///
    /// The mirror flag is latched here: `set_direction` takes effect on the
    /// next frame change, never on the frame already displayed.
    pub fn advance(&mut self) {
        self.timer += 1;
        if self.timer >= self.cadence {
            self.index = (self.index + 1) % self.frame_count;
            self.mirrored = !self.facing_right;
            self.timer = 0;
        }
    }

    pub fn set_direction(&mut self, facing_right: bool) {
        self.facing_right = facing_right;
    }

    /// Source rect of the frame to draw
    pub fn frame(&self) -> FrameRect {
        FrameRect {
            x: self.index * self.frame_width,
            y: 0,
            w: self.frame_width,
            h: self.frame_height,
        }
    }

    pub fn mirrored(&self) -> bool {
        self.mirrored
    }

    pub fn frame_index(&self) -> u32 {
        self.index
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cycler(sheet_width: u32, cadence: u32) -> FrameCycler {
        FrameCycler::new(
            SheetLayout {
                width: sheet_width,
                height: 90,
            },
            85,
            90,
            cadence,
        )
        .unwrap()
    }

    #[test]
    fn partitions_sheet_left_to_right() {
        let cycler = cycler(255, 10);
        assert_eq!(cycler.frame_count(), 3);
        assert_eq!(
            cycler.frame(),
            FrameRect {
                x: 0,
                y: 0,
                w: 85,
                h: 90
            }
        );
    }

    #[test]
    fn drops_partial_trailing_frame() {
        // 300 / 85 = 3 complete frames, 45px remainder ignored
        assert_eq!(cycler(300, 10).frame_count(), 3);
    }

    #[test]
    fn advances_only_at_cadence_and_wraps() {
        let mut cycler = cycler(255, 10);
        for _ in 0..9 {
            cycler.advance();
        }
        assert_eq!(cycler.frame_index(), 0);
        cycler.advance();
        assert_eq!(cycler.frame_index(), 1);
        assert_eq!(cycler.frame().x, 85);

        // 20 more ticks: two steps, wrapping 2 -> 0
        for _ in 0..20 {
            cycler.advance();
        }
        assert_eq!(cycler.frame_index(), 0);
    }

    #[test]
    fn mirror_latches_on_next_frame_change_only() {
        let mut cycler = cycler(255, 10);
        cycler.advance();
        cycler.set_direction(false);
        // The displayed frame is not retroactively flipped
        assert!(!cycler.mirrored());
        for _ in 0..10 {
            cycler.advance();
        }
        assert!(cycler.mirrored());

        cycler.set_direction(true);
        assert!(cycler.mirrored());
        for _ in 0..10 {
            cycler.advance();
        }
        assert!(!cycler.mirrored());
    }

    #[test]
    fn rejects_degenerate_construction() {
        let sheet = SheetLayout {
            width: 255,
            height: 90,
        };
        assert_eq!(
            FrameCycler::new(sheet, 0, 90, 10),
            Err(SimError::InvalidFrameSpec)
        );
        assert_eq!(
            FrameCycler::new(sheet, 85, 90, 0),
            Err(SimError::InvalidFrameSpec)
        );
        assert_eq!(
            FrameCycler::new(
                SheetLayout {
                    width: 40,
                    height: 90
                },
                85,
                90,
                10
            ),
            Err(SimError::EmptyFrameSequence {
                sheet_width: 40,
                frame_width: 85
            })
        );
        assert_eq!(
            FrameCycler::new(
                SheetLayout {
                    width: 255,
                    height: 50
                },
                85,
                90,
                10
            ),
            Err(SimError::SheetTooShort {
                sheet_height: 50,
                frame_height: 90
            })
        );
    }
}
