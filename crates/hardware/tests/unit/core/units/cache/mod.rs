//! Cache model tests: costing, replacement, dirty tracking and LRU properties.
