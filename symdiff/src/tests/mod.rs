//! Cross-module tests: the composed pipeline and quickcheck properties.
