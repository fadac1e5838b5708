//! Restart scheduling over Luby or geometric budgets.
use crate::types::*;

/// API for restart control.
pub trait RestartIF {
    /// return the conflict budget of the next search round.
    fn next_budget(&mut self) -> usize;
    /// rewind the schedule.
    fn reset(&mut self);
}

#[derive(Clone, Debug, Default)]
pub struct Restarter {
    luby: LubySeries,
    enable_luby: bool,
    restart_first: usize,
    restart_inc: f64,
    curr_restarts: u32,
}

impl Instantiate for Restarter {
    fn instantiate(config: &Config, _cnf: &CNFDescription) -> Restarter {
        Restarter {
            luby: LubySeries::default(),
            enable_luby: config.use_luby(),
            restart_first: config.restart_first,
            restart_inc: config.restart_inc,
            curr_restarts: 0,
        }
    }
}

impl RestartIF for Restarter {
    fn next_budget(&mut self) -> usize {
        let scale = if self.enable_luby {
            self.luby.next_unchecked() as f64
        } else {
            self.restart_inc.powi(self.curr_restarts as i32)
        };
        self.curr_restarts += 1;
        (scale * self.restart_first as f64) as usize
    }
    fn reset(&mut self) {
        self.luby.reset();
        self.curr_restarts = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luby_budgets() {
        let config = Config::default();
        let mut rst = Restarter::instantiate(&config, &CNFDescription::default());
        assert_eq!(rst.next_budget(), 100);
        assert_eq!(rst.next_budget(), 100);
        assert_eq!(rst.next_budget(), 200);
        assert_eq!(rst.next_budget(), 100);
    }
    #[test]
    fn test_geometric_budgets() {
        let config = Config {
            luby_restart: 0,
            ..Config::default()
        };
        let mut rst = Restarter::instantiate(&config, &CNFDescription::default());
        assert_eq!(rst.next_budget(), 100);
        assert_eq!(rst.next_budget(), 200);
        assert_eq!(rst.next_budget(), 400);
    }
}
