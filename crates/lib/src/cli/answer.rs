use core::fmt;

/// A solver output which can be reported as a sequence of puzzle answers.
pub trait Answer {
    /// Visit each part of the answer in order.
    fn parts(&self, visit: &mut dyn FnMut(&dyn fmt::Display));
}

impl<A, B> Answer for (A, B)
where
    A: Answer,
    B: Answer,
{
    #[inline]
    fn parts(&self, visit: &mut dyn FnMut(&dyn fmt::Display)) {
        self.0.parts(visit);
        self.1.parts(visit);
    }
}

macro_rules! display {
    ($ty:ty) => {
        impl Answer for $ty {
            #[inline]
            fn parts(&self, visit: &mut dyn FnMut(&dyn fmt::Display)) {
                visit(self);
            }
        }
    };
}

display!(usize);
display!(u32);
display!(u64);
display!(i64);

#[cfg(test)]
mod tests {
    use super::Answer;

    #[test]
    fn test_parts() {
        let mut out = Vec::new();
        (142u32, 281u64).parts(&mut |part| out.push(part.to_string()));
        assert_eq!(out, ["142", "281"]);
    }
}
