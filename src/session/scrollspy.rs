use crate::content::SectionId;
use crate::ui::page::SectionBlock;

/// Resolves which nav section the reader is currently "in".
///
/// The probe is a horizontal band 20%-30% down the viewport, expressed in
/// document rows. The deepest nav section whose extent crosses the band is
/// active, so a section becomes current as its heading passes the reading
/// line rather than when it merely peeks in at the bottom.
pub fn active_section(
    scroll: u16,
    viewport_height: u16,
    sections: &[SectionBlock],
) -> Option<SectionId> {
    let scroll = scroll as usize;
    // Half-open row range, like the section extents themselves.
    let band_top = scroll + viewport_height as usize * 20 / 100;
    let band_bottom = scroll + viewport_height as usize * 30 / 100;

    sections
        .iter()
        .filter(|block| block.id.nav_key().is_some())
        .filter(|block| (block.start as usize) < band_bottom && (block.end() as usize) > band_top)
        .map(|block| block.id)
        .last()
}
