lib::entry!(input = "d02.txt", y2023::d02::solve);
