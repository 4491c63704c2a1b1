//! Layered Compositor
//!
//! Z-ordered layers, each with its own buffer, composited back to front
//! into one output buffer. The tally screen is five fixed planes (surface,
//! chrome, history, flight, modal); the flight layer is re-positioned every
//! frame while the glyph is in transit, and the modal plane simply toggles
//! visibility.

use ratatui::buffer::{Buffer, Cell};
use ratatui::layout::Rect;

/// Unique identifier for a layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayerId(usize);

/// A single compositable plane.
#[derive(Clone, Debug)]
struct Layer {
    z_index: i32,
    /// Screen position; the buffer itself is origin-based.
    bounds: Rect,
    visible: bool,
    buffer: Buffer,
}

impl Layer {
    fn new(bounds: Rect, z_index: i32) -> Self {
        Self {
            z_index,
            bounds,
            visible: true,
            buffer: Buffer::empty(Rect::new(0, 0, bounds.width, bounds.height)),
        }
    }
}

/// Owns all layers and composites them in z order.
pub struct Compositor {
    /// Layers in creation order; `LayerId` indexes into this.
    layers: Vec<Layer>,
    /// Indices sorted by z (back to front).
    render_order: Vec<usize>,
    output: Buffer,
    area: Rect,
}

impl Compositor {
    pub fn new(area: Rect) -> Self {
        Self {
            layers: Vec::new(),
            render_order: Vec::new(),
            output: Buffer::empty(area),
            area,
        }
    }

    /// Create a layer; higher `z_index` renders in front.
    pub fn create_layer(&mut self, bounds: Rect, z_index: i32) -> LayerId {
        self.layers.push(Layer::new(bounds, z_index));
        let id = LayerId(self.layers.len() - 1);
        self.sort_render_order();
        id
    }

    /// Mutable access to a layer's buffer for drawing.
    pub fn buffer_mut(&mut self, id: LayerId) -> Option<&mut Buffer> {
        self.layers.get_mut(id.0).map(|layer| &mut layer.buffer)
    }

    /// Reposition and resize a layer. Resizing drops the old buffer
    /// contents; callers redraw every frame anyway.
    pub fn set_bounds(&mut self, id: LayerId, bounds: Rect) {
        if let Some(layer) = self.layers.get_mut(id.0) {
            if layer.bounds.width != bounds.width || layer.bounds.height != bounds.height {
                layer.buffer = Buffer::empty(Rect::new(0, 0, bounds.width, bounds.height));
            }
            layer.bounds = bounds;
        }
    }

    pub fn bounds(&self, id: LayerId) -> Option<Rect> {
        self.layers.get(id.0).map(|layer| layer.bounds)
    }

    pub fn set_visible(&mut self, id: LayerId, visible: bool) {
        if let Some(layer) = self.layers.get_mut(id.0) {
            layer.visible = visible;
        }
    }

    pub fn is_visible(&self, id: LayerId) -> bool {
        self.layers.get(id.0).is_some_and(|layer| layer.visible)
    }

    /// Resize the whole screen.
    pub fn resize(&mut self, area: Rect) {
        self.area = area;
        self.output = Buffer::empty(area);
    }

    /// Composite all visible layers, back to front.
    pub fn composite(&mut self) -> &Buffer {
        self.output.reset();
        for &idx in &self.render_order {
            let layer = &self.layers[idx];
            if layer.visible {
                Self::blit(&mut self.output, self.area, layer);
            }
        }
        &self.output
    }

    /// Topmost visible layer containing the point, for routing mouse hits.
    pub fn layer_at(&self, x: u16, y: u16) -> Option<LayerId> {
        self.render_order
            .iter()
            .rev()
            .copied()
            .find(|&idx| {
                let layer = &self.layers[idx];
                layer.visible && contains(layer.bounds, x, y)
            })
            .map(LayerId)
    }

    fn blit(output: &mut Buffer, area: Rect, layer: &Layer) {
        let bounds = layer.bounds;
        let empty = Cell::default();

        for row in 0..bounds.height {
            let dst_y = bounds.y + row;
            if dst_y >= area.height {
                break;
            }
            for col in 0..bounds.width {
                let dst_x = bounds.x + col;
                if dst_x >= area.width {
                    break;
                }

                let src_idx = layer.buffer.index_of(col, row);
                if src_idx >= layer.buffer.content.len() {
                    continue;
                }
                let src_cell = &layer.buffer.content[src_idx];

                // Untouched cells are transparent, so layers can have holes;
                // a styled space (painted background) still lands.
                if *src_cell == empty {
                    continue;
                }

                let dst_idx = output.index_of(dst_x, dst_y);
                if dst_idx < output.content.len() {
                    output.content[dst_idx] = src_cell.clone();
                }
            }
        }
    }

    fn sort_render_order(&mut self) {
        self.render_order = (0..self.layers.len()).collect();
        self.render_order.sort_by_key(|&idx| self.layers[idx].z_index);
    }
}

fn contains(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

#[cfg(test)]
mod tests {
    use ratatui::style::{Color, Style};

    use super::*;

    fn screen() -> Rect {
        Rect::new(0, 0, 20, 10)
    }

    #[test]
    fn test_front_layer_occludes() {
        let mut compositor = Compositor::new(screen());
        let back = compositor.create_layer(screen(), 0);
        let front = compositor.create_layer(Rect::new(2, 2, 5, 1), 10);

        compositor
            .buffer_mut(back)
            .unwrap()
            .set_string(0, 2, "....................", Style::default());
        compositor
            .buffer_mut(front)
            .unwrap()
            .set_string(0, 0, "abcde", Style::default());

        let out = compositor.composite();
        assert_eq!(out.content[out.index_of(2, 2)].symbol(), "a");
        assert_eq!(out.content[out.index_of(1, 2)].symbol(), ".");
    }

    #[test]
    fn test_untouched_cells_are_transparent() {
        let mut compositor = Compositor::new(screen());
        let back = compositor.create_layer(screen(), 0);
        let front = compositor.create_layer(screen(), 10);

        compositor
            .buffer_mut(back)
            .unwrap()
            .set_string(0, 0, "below", Style::default());
        compositor
            .buffer_mut(front)
            .unwrap()
            .set_string(10, 0, "above", Style::default());

        let out = compositor.composite();
        assert_eq!(out.content[out.index_of(0, 0)].symbol(), "b");
        assert_eq!(out.content[out.index_of(10, 0)].symbol(), "a");
    }

    #[test]
    fn test_styled_space_is_opaque() {
        let mut compositor = Compositor::new(screen());
        let back = compositor.create_layer(screen(), 0);
        let front = compositor.create_layer(Rect::new(0, 0, 3, 1), 10);

        compositor
            .buffer_mut(back)
            .unwrap()
            .set_string(0, 0, "xxx", Style::default());
        compositor
            .buffer_mut(front)
            .unwrap()
            .set_string(0, 0, "   ", Style::default().bg(Color::Black));

        let out = compositor.composite();
        assert_eq!(out.content[out.index_of(0, 0)].symbol(), " ");
    }

    #[test]
    fn test_hidden_layers_skip_compositing_and_hits() {
        let mut compositor = Compositor::new(screen());
        let layer = compositor.create_layer(Rect::new(0, 0, 5, 5), 10);
        compositor
            .buffer_mut(layer)
            .unwrap()
            .set_string(0, 0, "hi", Style::default());

        compositor.set_visible(layer, false);
        let out = compositor.composite();
        assert_eq!(out.content[out.index_of(0, 0)].symbol(), " ");
        assert_eq!(compositor.layer_at(1, 0), None);
    }

    #[test]
    fn test_hit_test_prefers_the_front() {
        let mut compositor = Compositor::new(screen());
        let back = compositor.create_layer(screen(), 0);
        let front = compositor.create_layer(Rect::new(5, 5, 3, 3), 50);

        assert_eq!(compositor.layer_at(6, 6), Some(front));
        assert_eq!(compositor.layer_at(0, 0), Some(back));
    }

    #[test]
    fn test_moving_a_layer_moves_its_pixels() {
        let mut compositor = Compositor::new(screen());
        let layer = compositor.create_layer(Rect::new(0, 0, 2, 1), 0);
        compositor
            .buffer_mut(layer)
            .unwrap()
            .set_string(0, 0, "fly", Style::default());

        compositor.set_bounds(layer, Rect::new(8, 4, 2, 1));
        compositor
            .buffer_mut(layer)
            .unwrap()
            .set_string(0, 0, "fl", Style::default());

        let out = compositor.composite();
        assert_eq!(out.content[out.index_of(8, 4)].symbol(), "f");
        assert_eq!(out.content[out.index_of(0, 0)].symbol(), " ");
    }
}
