/// Travel time and dwell time, in the (integer) time unit of the network file.
pub type Cost = u64;

/// Satisfaction collected at a key point.
pub type Satisfaction = u64;
