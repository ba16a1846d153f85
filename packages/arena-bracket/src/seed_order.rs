use std::collections::VecDeque;

#[derive(Debug)]
enum SeedGroup {
    Seed(usize),
    Pair(Box<SeedGroup>, Box<SeedGroup>),
}

impl SeedGroup {
    fn flatten_into(self, result: &mut Vec<usize>) {
        match self {
            SeedGroup::Seed(seed) => result.push(seed),
            SeedGroup::Pair(high, low) => {
                high.flatten_into(result);
                low.flatten_into(result);
            }
        }
    }
}

/// Standard bracket layout for `size` slots (a power of two), as 0-based seed indices.
///
/// The list is folded onto itself, best with worst, second best with second worst, and the
/// resulting groups are folded the same way until two halves remain. Reading the groups back
/// in order gives the slot sequence, so seed 0 can only meet seed 1 in the final and byes
/// padded at the end always land against the top seeds.
pub fn bracket_order(size: usize) -> Vec<usize> {
    if size <= 2 {
        return (0..size).collect();
    }

    let mut groups: Vec<SeedGroup> = (0..size).map(SeedGroup::Seed).collect();
    while groups.len() > 2 {
        let mut queue: VecDeque<SeedGroup> = groups.into();
        let mut folded = Vec::with_capacity(queue.len() / 2);

        while let (Some(high), Some(low)) = (queue.pop_front(), queue.pop_back()) {
            folded.push(SeedGroup::Pair(Box::new(high), Box::new(low)));
        }

        groups = folded;
    }

    let mut result = Vec::with_capacity(size);
    for group in groups {
        group.flatten_into(&mut result);
    }
    result
}
