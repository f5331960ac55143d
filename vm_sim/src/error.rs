/*
 *  Copyright (C) 2025  Markus Elias Gerber
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  You should have received a copy of the GNU General Public License
 *  along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

use thiserror::Error;

/// Rejections at process creation time. None of these are fatal, the
/// simulator stays usable after every one of them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CreateProcessError {
    #[error("process id '{0}' already exists")]
    DuplicatePid(String),

    #[error("process {pid} with size {size_kb} KB results in 0 pages")]
    ZeroPages { pid: String, size_kb: usize },

    #[error("process {pid} requires {requested} pages, at most {limit} allowed")]
    PageLimitExceeded {
        pid: String,
        requested: usize,
        limit: usize,
    },
}

/// Caller visible translation failures. Ordinary page faults are not in
/// here, they are resolved silently by the demand loader.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    #[error("no active process")]
    NoActiveProcess,

    #[error(
        "segmentation fault: page {page} is outside the address space of \
         process {pid} ({pages_needed} pages)"
    )]
    SegmentationFault {
        pid: String,
        page: usize,
        pages_needed: usize,
    },

    /// No frame could be freed even via replacement. Only reachable when
    /// zero frames are configured.
    #[error("unresolvable page fault: no frame could be freed for page {page} of process {pid}")]
    UnresolvableFault { pid: String, page: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown replacement algorithm '{0}', expected \"FIFO\" or \"LRU\"")]
pub struct ParseAlgorithmError(pub String);
