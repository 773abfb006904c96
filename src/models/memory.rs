// /proc/meminfo figures, all in kB

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryFigures {
    pub total: u64,
    pub free: u64,
    pub available: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapFigures {
    pub total: u64,
    pub free: u64,
}

/// Contiguous Memory Allocator pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CmaFigures {
    pub total: u64,
    pub free: u64,
}
