// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! File-backed persistence for the save endpoints and the request log.

mod data_folder;

pub use data_folder::{csv_filename_for, DataFolder, SavedCsv, StoreError, WriteDurability};
