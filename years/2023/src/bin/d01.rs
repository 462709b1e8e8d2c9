lib::entry!(input = "d01.txt", y2023::d01::solve);
