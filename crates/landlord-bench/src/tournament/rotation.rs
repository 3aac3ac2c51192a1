/// Deterministic seatings: rotation `r` puts agent `(seat + r) % n` in each
/// seat, so every rotation hands the opening lead to a different agent.
pub struct SeatRotations {
    seatings: Vec<Vec<usize>>,
}

impl SeatRotations {
    pub fn new(agents: usize, count: usize) -> Self {
        let limit = count.min(agents);
        let seatings = (0..limit)
            .map(|shift| (0..agents).map(|seat| (seat + shift) % agents).collect())
            .collect();
        Self { seatings }
    }

    pub fn as_slice(&self) -> &[Vec<usize>] {
        &self.seatings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_rotation_keeps_config_order() {
        let rotations = SeatRotations::new(3, 1);
        assert_eq!(rotations.as_slice(), &[vec![0, 1, 2]]);
    }

    #[test]
    fn each_rotation_changes_the_leader() {
        let rotations = SeatRotations::new(4, 4);
        let leaders: Vec<usize> = rotations.as_slice().iter().map(|s| s[0]).collect();
        assert_eq!(leaders, vec![0, 1, 2, 3]);
        assert_eq!(rotations.as_slice()[1], vec![1, 2, 3, 0]);
    }

    #[test]
    fn caps_at_agent_count() {
        let rotations = SeatRotations::new(3, 10);
        assert_eq!(rotations.as_slice().len(), 3);
    }
}
