/// Content shown in the vision panel.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum VisionView {
    #[default]
    AnalogClock,
    /// Empty panel; the rain shows through.
    Matrix,
}

impl VisionView {
    pub const ALL: [VisionView; 2] = [VisionView::AnalogClock, VisionView::Matrix];

    pub fn title(self) -> &'static str {
        match self {
            VisionView::AnalogClock => "ANALOG CLOCK",
            VisionView::Matrix => "MATRIX",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|v| *v == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Dashboard-wide flags, passed by reference to every widget's `update`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct DashboardState {
    pub night_mode: bool,
    pub view: VisionView,
    /// Inside the bedtime window: animations stopped, screen blank.
    pub sleeping: bool,
}

impl DashboardState {
    pub fn toggle_night_mode(&mut self) {
        self.night_mode = !self.night_mode;
    }

    pub fn next_view(&mut self) {
        self.view = self.view.next();
    }

    pub fn previous_view(&mut self) {
        self.view = self.view.previous();
    }
}
