/// Percentage of votes that are upvotes, truncated toward zero.
///
/// Returns 0 when there are no votes.
///
/// | up | down | accuracy |
/// |----|------|----------|
/// | 0  | 0    | 0        |
/// | 3  | 1    | 75       |
/// | 1  | 3    | 25       |
/// | 2  | 1    | 66       |
pub fn accuracy(upvotes: u32, downvotes: u32) -> u8 {
    let total = u64::from(upvotes) + u64::from(downvotes);
    if total == 0 {
        return 0;
    }
    (u64::from(upvotes) * 100 / total) as u8
}
