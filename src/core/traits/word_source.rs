/// Port for the fixed list of words passphrases are drawn from.
///
/// Implementations must return a deduplicated, immutable list; it is
/// shared read-only between concurrent requests.
pub trait WordSource: Send + Sync {
    fn words(&self) -> &[String];
}

impl<T: WordSource + ?Sized> WordSource for Box<T> {
    fn words(&self) -> &[String] {
        (**self).words()
    }
}
